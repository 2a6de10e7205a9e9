//! Node families for Ash: schema extraction, matching, and node pooling.
//!
//! This crate provides:
//! - [`NodeShape`] and [`Slot`] - Declaring the components a node binds
//! - [`Schema`] - The required component kinds of a node shape
//! - [`MatchTable`] - Matched entities and their nodes
//! - [`NodePool`] and [`RecyclingPool`] - Node allocation and reuse
//! - [`Family`] - The event-driven matching engine
//! - [`FamilyConfig`] - Bind policy and pool sizing
//!
//! # Events
//!
//! ```text
//! entity_added       -> attempt match (error if already added)
//! entity_removed     -> release node if matched
//! component_added    -> attempt match unless already matched
//! component_removed  -> release node if matched and kind is required
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod family;
pub mod pool;
pub mod schema;
pub mod shape;
pub mod table;

pub use config::{BindPolicy, FamilyConfig};
pub use family::{Family, FamilyObserver};
pub use pool::{NodePool, PoolStats, RecyclingPool};
pub use schema::Schema;
pub use shape::{NodeShape, Slot, SlotBinding, SlotDeclarations};
pub use table::MatchTable;
