//! Core identifiers, component kinds, and errors for Ash.
//!
//! This crate provides:
//! - [`EntityId`] - Generational entity identifiers
//! - [`ComponentKind`] and [`KindRegistry`] - Dense integer ids for component types
//! - [`ComponentSource`] - The read-only view of entity/component storage that families consume
//! - [`Error`] - Error types shared by every layer

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod component;
pub mod entity;
pub mod error;
pub mod kind;

pub use component::{Component, ComponentRef, ComponentSource, Shared, downcast_ref, share};
pub use entity::EntityId;
pub use error::{Error, ErrorKind, Result};
pub use kind::{ComponentKind, KindRegistry, short_type_name};
