//! The engine: a world plus the families kept in sync with it.
//!
//! Every structural change made through the engine is applied to the world
//! first and then broadcast to each family as one notification. Families are
//! created on first request and seeded once from the entities that already
//! exist; after that they only see notifications.

use std::any::TypeId;
use std::collections::HashMap;

use ash_family::{Family, FamilyObserver, NodeShape};
use ash_foundation::{Component, EntityId, Result, Shared};
use ash_storage::World;
use tracing::{debug, warn};

use crate::config::EngineConfig;

/// A world and its node families.
pub struct Engine {
    world: World,
    families: Vec<Box<dyn FamilyObserver>>,
    /// Node shape -> position in `families`.
    by_shape: HashMap<TypeId, usize>,
    config: EngineConfig,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine with an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Creates an engine with an empty world and the given configuration.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            world: World::new(),
            families: Vec::new(),
            by_shape: HashMap::new(),
            config,
        }
    }

    // =========================================================================
    // Entities and components
    // =========================================================================

    /// Spawns an entity and announces it to every family.
    ///
    /// # Errors
    ///
    /// Returns `StateViolation` if a family already tracks the new id, which
    /// means a family was fed notifications from outside this engine. The
    /// spawn is rolled back: families told before the failing one forget the
    /// entity and the world despawns it.
    pub fn spawn(&mut self) -> Result<EntityId> {
        let entity = self.world.spawn();
        for position in 0..self.families.len() {
            if let Err(err) = self.families[position].entity_added(&self.world, entity) {
                for family in &mut self.families[..position] {
                    family.entity_removed(entity);
                }
                self.world.despawn(entity)?;
                warn!(?entity, node = self.families[position].node_name(), "spawn rolled back");
                return Err(err);
            }
        }
        Ok(entity)
    }

    /// Destroys an entity, removing it from every family.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not alive.
    pub fn despawn(&mut self, entity: EntityId) -> Result<()> {
        self.world.despawn(entity)?;
        for family in &mut self.families {
            family.entity_removed(entity);
        }
        Ok(())
    }

    /// Attaches `value` to `entity`, replacing any existing `C`.
    ///
    /// Families are told a `C` was added even when it replaced one.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not alive.
    pub fn insert<C: Component>(&mut self, entity: EntityId, value: C) -> Result<Shared<C>> {
        let handle = self.world.insert(entity, value)?;
        let kind = self.world.kind::<C>();
        for family in &mut self.families {
            family.component_added(&self.world, entity, kind);
        }
        Ok(handle)
    }

    /// Detaches the `C` component from `entity`.
    ///
    /// Families are only notified if a component was actually removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not alive.
    pub fn remove<C: Component>(&mut self, entity: EntityId) -> Result<Option<Shared<C>>> {
        let removed = self.world.remove::<C>(entity)?;
        if removed.is_some() {
            let kind = self.world.kind::<C>();
            for family in &mut self.families {
                family.component_removed(entity, kind);
            }
        }
        Ok(removed)
    }

    /// Returns the `C` component of `entity`.
    #[must_use]
    pub fn get<C: Component>(&self, entity: EntityId) -> Option<Shared<C>> {
        self.world.get::<C>(entity)
    }

    // =========================================================================
    // Families
    // =========================================================================

    /// Returns the family for `N`, creating it if needed.
    ///
    /// A new family is seeded with every live entity.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateSlot` if `N` declares one component twice.
    pub fn family<N: NodeShape>(&mut self) -> Result<&Family<N>> {
        let position = self.ensure_family::<N>()?;
        Ok(downcast(&*self.families[position]))
    }

    /// Returns the family for `N` mutably, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateSlot` if `N` declares one component twice.
    pub fn family_mut<N: NodeShape>(&mut self) -> Result<&mut Family<N>> {
        let position = self.ensure_family::<N>()?;
        Ok(downcast_mut(&mut *self.families[position]))
    }

    /// Returns the matched nodes for `N`, creating the family if needed.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateSlot` if `N` declares one component twice.
    pub fn nodes<N: NodeShape>(&mut self) -> Result<&[N]> {
        self.family::<N>().map(Family::nodes)
    }

    /// Returns the matched nodes for `N` mutably, creating the family if needed.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateSlot` if `N` declares one component twice.
    pub fn nodes_mut<N: NodeShape>(&mut self) -> Result<&mut [N]> {
        self.family_mut::<N>().map(Family::nodes_mut)
    }

    /// Returns true if a family for `N` exists.
    #[must_use]
    pub fn has_family<N: NodeShape>(&self) -> bool {
        self.by_shape.contains_key(&TypeId::of::<N>())
    }

    /// Drops the family for `N`, releasing its nodes.
    ///
    /// Returns false if there was no such family.
    pub fn remove_family<N: NodeShape>(&mut self) -> bool {
        let Some(position) = self.by_shape.remove(&TypeId::of::<N>()) else {
            return false;
        };

        let mut family = self.families.swap_remove(position);
        family.clear();
        debug!(node = family.node_name(), "family removed");

        // The former last family now lives at `position`.
        if position < self.families.len() {
            for slot in self.by_shape.values_mut() {
                if *slot == self.families.len() {
                    *slot = position;
                }
            }
        }
        true
    }

    /// Returns the number of families.
    #[must_use]
    pub fn family_count(&self) -> usize {
        self.families.len()
    }

    fn ensure_family<N: NodeShape>(&mut self) -> Result<usize> {
        let shape = TypeId::of::<N>();
        if let Some(&position) = self.by_shape.get(&shape) {
            return Ok(position);
        }

        let mut family = Family::<N>::with_config(self.world.registry_mut(), self.config.family.clone())?;
        for entity in self.world.entities() {
            family.entity_added(&self.world, entity)?;
        }
        debug!(
            node = family.schema().node_name(),
            seeded = self.world.entity_count(),
            matched = family.len(),
            "family created"
        );

        let position = self.families.len();
        self.families.push(Box::new(family));
        self.by_shape.insert(shape, position);
        Ok(position)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.world.entity_count()
    }
}

/// Recovers a concrete family from its observer.
///
/// # Panics
///
/// Panics if the observer is not a `Family<N>`; families are stored under
/// their node shape's `TypeId`, so a mismatch is a bug in this module.
fn downcast<N: NodeShape>(observer: &dyn FamilyObserver) -> &Family<N> {
    observer
        .as_any()
        .downcast_ref::<Family<N>>()
        .expect("family stored under another node shape")
}

/// Mutable counterpart of [`downcast`].
fn downcast_mut<N: NodeShape>(observer: &mut dyn FamilyObserver) -> &mut Family<N> {
    observer
        .as_any_mut()
        .downcast_mut::<Family<N>>()
        .expect("family stored under another node shape")
}
