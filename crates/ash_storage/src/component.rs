//! Component storage organized in per-kind columns.
//!
//! Each registered [`ComponentKind`] owns one column mapping entities to
//! component handles. Columns are found by kind index, never by type.

use std::collections::HashMap;

use ash_foundation::{ComponentKind, ComponentRef, ComponentSource, EntityId};

/// Stores every component handle, one column per kind.
#[derive(Clone, Debug, Default)]
pub struct ComponentStore {
    /// Component handles: kind index -> entity -> handle.
    columns: Vec<HashMap<EntityId, ComponentRef>>,
}

impl ComponentStore {
    /// Creates an empty component store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `handle` to `entity` as its component of `kind`.
    ///
    /// Returns the handle it replaced, if the entity already had one.
    pub fn insert(
        &mut self,
        entity: EntityId,
        kind: ComponentKind,
        handle: ComponentRef,
    ) -> Option<ComponentRef> {
        let column = kind.as_usize();
        if self.columns.len() <= column {
            self.columns.resize_with(column + 1, HashMap::new);
        }
        self.columns[column].insert(entity, handle)
    }

    /// Detaches the component of `kind` from `entity`.
    ///
    /// Returns the removed handle if it existed.
    pub fn remove(&mut self, entity: EntityId, kind: ComponentKind) -> Option<ComponentRef> {
        self.columns.get_mut(kind.as_usize())?.remove(&entity)
    }

    /// Returns the handle of the component of `kind` on `entity`.
    #[must_use]
    pub fn get(&self, entity: EntityId, kind: ComponentKind) -> Option<&ComponentRef> {
        self.columns.get(kind.as_usize())?.get(&entity)
    }

    /// Checks if `entity` has a component of `kind`.
    #[must_use]
    pub fn contains(&self, entity: EntityId, kind: ComponentKind) -> bool {
        self.columns
            .get(kind.as_usize())
            .is_some_and(|column| column.contains_key(&entity))
    }

    /// Removes every component of `entity`.
    ///
    /// Returns the number of components removed.
    pub fn remove_entity(&mut self, entity: EntityId) -> usize {
        self.columns
            .iter_mut()
            .filter_map(|column| column.remove(&entity))
            .count()
    }

    /// Returns the kinds currently attached to `entity`, in kind order.
    #[must_use]
    pub fn kinds_of(&self, entity: EntityId) -> Vec<ComponentKind> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, column)| column.contains_key(&entity))
            .map(|(column, _)| kind_at(column))
            .collect()
    }

    /// Returns the number of entities with a component of `kind`.
    #[must_use]
    pub fn count(&self, kind: ComponentKind) -> usize {
        self.columns.get(kind.as_usize()).map_or(0, HashMap::len)
    }
}

impl ComponentSource for ComponentStore {
    fn has_component(&self, entity: EntityId, kind: ComponentKind) -> bool {
        self.contains(entity, kind)
    }

    fn get_component(&self, entity: EntityId, kind: ComponentKind) -> Option<ComponentRef> {
        self.get(entity, kind).cloned()
    }
}

/// Rebuilds a kind from its column index.
///
/// Columns are only ever created for kinds handed out by a registry, so the
/// index always fits.
#[allow(clippy::cast_possible_truncation)]
fn kind_at(column: usize) -> ComponentKind {
    ComponentKind::from_index(column as u32)
}
