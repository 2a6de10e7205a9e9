//! Ash - entity/component matching core
//!
//! This crate re-exports all layers of the Ash system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: ash_engine     - World + families, event broadcast
//! Layer 2: ash_family     - Schemas, match tables, node pools, matching
//! Layer 1: ash_storage    - Entity and component storage
//! Layer 0: ash_foundation - Core types (EntityId, ComponentKind, Error)
//! ```

pub use ash_engine as engine;
pub use ash_family as family;
pub use ash_foundation as foundation;
pub use ash_storage as storage;
