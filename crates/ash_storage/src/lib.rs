//! Entity and component storage for Ash.
//!
//! This crate provides:
//! - [`EntityStore`] - Generational entity allocation
//! - [`ComponentStore`] - Per-kind component columns
//! - [`World`] - Typed access to both, and the [`ComponentSource`](ash_foundation::ComponentSource) view families match against

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod component;
pub mod entity;
pub mod world;

pub use component::ComponentStore;
pub use entity::EntityStore;
pub use world::World;
