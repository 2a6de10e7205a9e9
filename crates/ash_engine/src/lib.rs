//! Event dispatch between the Ash world and its node families.
//!
//! This crate provides:
//! - [`Engine`] - Applies entity/component changes and notifies every family
//! - [`EngineConfig`] - Defaults for the families the engine creates

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod engine;

pub use config::EngineConfig;
pub use engine::Engine;
