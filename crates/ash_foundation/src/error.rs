//! Error types for Ash.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use thiserror::Error;

use crate::entity::EntityId;

/// The main error type for Ash operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional note about where the error occurred (family, operation).
    pub context: Option<String>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Creates a state violation error for `entity`.
    #[must_use]
    pub fn state_violation(entity: EntityId, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::StateViolation {
            entity,
            reason: reason.into(),
        })
    }

    /// Creates a duplicate slot error for a node shape.
    #[must_use]
    pub fn duplicate_slot(node: &'static str, component: &'static str) -> Self {
        Self::new(ErrorKind::DuplicateSlot { node, component })
    }

    /// Creates an entity not found error.
    #[must_use]
    pub fn entity_not_found(id: EntityId) -> Self {
        Self::new(ErrorKind::EntityNotFound(id))
    }

    /// Creates a stale entity reference error.
    #[must_use]
    pub fn stale_entity(id: EntityId) -> Self {
        Self::new(ErrorKind::StaleEntity(id))
    }

    /// Returns true if this is a [`ErrorKind::StateViolation`].
    #[must_use]
    pub fn is_state_violation(&self) -> bool {
        matches!(self.kind, ErrorKind::StateViolation { .. })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// An event contradicted what a family already knows about an entity,
    /// such as adding an entity it already tracks.
    #[error("state violation on {entity:?}: {reason}")]
    StateViolation {
        /// The entity the event referred to.
        entity: EntityId,
        /// What was contradicted.
        reason: String,
    },

    /// A node shape declared two slots for the same component kind.
    #[error("node {node} declares more than one slot for component {component}")]
    DuplicateSlot {
        /// The node shape's type name.
        node: &'static str,
        /// The component declared twice.
        component: &'static str,
    },

    /// Entity was not found in storage.
    #[error("entity not found: {0:?}")]
    EntityNotFound(EntityId),

    /// Entity reference is stale (generation mismatch).
    #[error("stale entity reference: {0:?}")]
    StaleEntity(EntityId),
}

/// Result type alias using the Ash error.
pub type Result<T> = std::result::Result<T, Error>;
