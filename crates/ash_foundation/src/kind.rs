//! Dense integer identifiers for component types.
//!
//! Every Rust type used as a component is registered once with a
//! [`KindRegistry`], which hands out [`ComponentKind`]s in registration order.
//! Kinds are small and contiguous, so per-kind tables are plain vectors
//! indexed by [`ComponentKind::index`] rather than maps keyed by type.

use std::any::{TypeId, type_name};
use std::collections::HashMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::component::Component;

/// Registered component kind identifier.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ComponentKind(pub(crate) u32);

impl ComponentKind {
    /// Rebuilds a kind from its raw index.
    ///
    /// Only meaningful for indices previously handed out by a [`KindRegistry`],
    /// e.g. when a table stores kinds by position.
    #[must_use]
    pub const fn from_index(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index of this kind.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Returns the index as a `usize`, for indexing per-kind tables.
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentKind({})", self.0)
    }
}

/// Registry assigning a [`ComponentKind`] to each component type.
///
/// Registration is idempotent. The registry is not thread-safe; the whole
/// matching core is driven from one thread.
#[derive(Clone, Debug, Default)]
pub struct KindRegistry {
    /// Type names, indexed by kind.
    names: Vec<&'static str>,
    /// Map from Rust type to its kind.
    by_type: HashMap<TypeId, ComponentKind>,
}

impl KindRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `C`, returning its kind.
    ///
    /// # Panics
    ///
    /// Panics if the number of registered kinds exceeds `u32::MAX`.
    pub fn register<C: Component>(&mut self) -> ComponentKind {
        let type_id = TypeId::of::<C>();
        if let Some(&kind) = self.by_type.get(&type_id) {
            return kind;
        }

        let index = u32::try_from(self.names.len()).expect("too many component kinds");
        let kind = ComponentKind(index);
        self.names.push(short_type_name::<C>());
        self.by_type.insert(type_id, kind);
        kind
    }

    /// Returns the kind of `C`, if it has been registered.
    #[must_use]
    pub fn kind_of<C: Component>(&self) -> Option<ComponentKind> {
        self.by_type.get(&TypeId::of::<C>()).copied()
    }

    /// Returns the short type name a kind was registered under.
    #[must_use]
    pub fn name(&self, kind: ComponentKind) -> Option<&'static str> {
        self.names.get(kind.as_usize()).copied()
    }

    /// Returns the number of registered kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates over every registered kind in registration order.
    #[allow(clippy::cast_possible_truncation)]
    pub fn kinds(&self) -> impl Iterator<Item = ComponentKind> + '_ {
        (0..self.names.len()).map(|i| ComponentKind(i as u32))
    }
}

/// Returns `T`'s type name without its module path (`game::Position` -> `Position`).
///
/// Generic names are returned whole.
#[must_use]
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = type_name::<T>();
    let head = full.split('<').next().unwrap_or(full);
    match head.rfind("::") {
        Some(pos) if full.len() == head.len() => &full[pos + 2..],
        _ => full,
    }
}
