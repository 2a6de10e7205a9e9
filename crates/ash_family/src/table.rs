//! The match table: which entities currently match, and their nodes.
//!
//! Nodes are stored densely so systems iterate a plain slice. Removal
//! swap-removes, which moves the last node into the hole; iteration order is
//! therefore not stable across mutations.

use std::collections::HashMap;

use ash_foundation::EntityId;

/// Dense entity -> node table.
#[derive(Debug)]
pub struct MatchTable<N> {
    /// Matched entities, parallel to `nodes`.
    entities: Vec<EntityId>,
    /// Bound nodes, parallel to `entities`.
    nodes: Vec<N>,
    /// Entity -> position in the dense vectors.
    index: HashMap<EntityId, usize>,
}

impl<N> Default for MatchTable<N> {
    fn default() -> Self {
        Self {
            entities: Vec::new(),
            nodes: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<N> MatchTable<N> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `entity` as matched with `node`.
    ///
    /// If the entity was already present, its old node is replaced and
    /// returned.
    pub fn insert(&mut self, entity: EntityId, node: N) -> Option<N> {
        if let Some(&position) = self.index.get(&entity) {
            return Some(std::mem::replace(&mut self.nodes[position], node));
        }

        self.index.insert(entity, self.nodes.len());
        self.entities.push(entity);
        self.nodes.push(node);
        None
    }

    /// Removes `entity`, returning its node.
    pub fn remove(&mut self, entity: EntityId) -> Option<N> {
        let position = self.index.remove(&entity)?;

        self.entities.swap_remove(position);
        let node = self.nodes.swap_remove(position);

        // The former last entry now lives at `position`.
        if let Some(&moved) = self.entities.get(position) {
            self.index.insert(moved, position);
        }

        Some(node)
    }

    /// Returns true if `entity` is matched.
    #[must_use]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.index.contains_key(&entity)
    }

    /// Returns the node of `entity`.
    #[must_use]
    pub fn get(&self, entity: EntityId) -> Option<&N> {
        self.index.get(&entity).map(|&position| &self.nodes[position])
    }

    /// Returns the node of `entity` mutably.
    pub fn get_mut(&mut self, entity: EntityId) -> Option<&mut N> {
        let position = *self.index.get(&entity)?;
        Some(&mut self.nodes[position])
    }

    /// Returns every matched node.
    #[must_use]
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    /// Returns every matched node mutably.
    pub fn nodes_mut(&mut self) -> &mut [N] {
        &mut self.nodes
    }

    /// Returns every matched entity, parallel to [`nodes`](Self::nodes).
    #[must_use]
    pub fn entities(&self) -> &[EntityId] {
        &self.entities
    }

    /// Iterates over (entity, node) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &N)> + '_ {
        self.entities.iter().copied().zip(self.nodes.iter())
    }

    /// Iterates over (entity, node) pairs with mutable nodes.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut N)> + '_ {
        self.entities.iter().copied().zip(self.nodes.iter_mut())
    }

    /// Removes every entry, yielding the nodes.
    pub fn drain(&mut self) -> impl Iterator<Item = N> + '_ {
        self.entities.clear();
        self.index.clear();
        self.nodes.drain(..)
    }

    /// Returns the number of matched entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if nothing is matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
