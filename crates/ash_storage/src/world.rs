//! The world: entities, their components, and the kind registry.
//!
//! `World` is the typed front door to storage. It validates entity liveness,
//! registers component types on first use, and exposes the untyped
//! [`ComponentSource`] view that families match against.

use ash_foundation::{
    Component, ComponentKind, ComponentRef, ComponentSource, EntityId, KindRegistry, Result,
    Shared, downcast_ref, share,
};

use crate::component::ComponentStore;
use crate::entity::EntityStore;

/// Entity and component state for one simulation.
#[derive(Clone, Debug, Default)]
pub struct World {
    entities: EntityStore,
    components: ComponentStore,
    registry: KindRegistry,
}

impl World {
    /// Creates an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Entities ---

    /// Spawns an entity with no components.
    pub fn spawn(&mut self) -> EntityId {
        self.entities.spawn()
    }

    /// Destroys an entity and drops every component attached to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not alive.
    pub fn despawn(&mut self, entity: EntityId) -> Result<()> {
        self.entities.destroy(entity)?;
        self.components.remove_entity(entity);
        Ok(())
    }

    /// Returns true if `entity` is alive.
    #[must_use]
    pub fn exists(&self, entity: EntityId) -> bool {
        self.entities.exists(entity)
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Iterates over live entities.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.iter()
    }

    // --- Components ---

    /// Returns the kind for `C`, registering it if needed.
    pub fn kind<C: Component>(&mut self) -> ComponentKind {
        self.registry.register::<C>()
    }

    /// Attaches `value` to `entity`, replacing any existing `C`.
    ///
    /// Returns the handle now stored on the entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not alive.
    pub fn insert<C: Component>(&mut self, entity: EntityId, value: C) -> Result<Shared<C>> {
        self.entities.validate(entity)?;
        let kind = self.kind::<C>();
        let handle = share(value);
        self.components.insert(entity, kind, handle.clone());
        Ok(handle)
    }

    /// Detaches the `C` component from `entity`.
    ///
    /// Returns the detached handle, or `None` if the entity had no `C`.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not alive.
    pub fn remove<C: Component>(&mut self, entity: EntityId) -> Result<Option<Shared<C>>> {
        self.entities.validate(entity)?;
        let Some(kind) = self.registry.kind_of::<C>() else {
            return Ok(None);
        };
        Ok(self
            .components
            .remove(entity, kind)
            .and_then(downcast_ref::<C>))
    }

    /// Returns the `C` component of `entity`.
    #[must_use]
    pub fn get<C: Component>(&self, entity: EntityId) -> Option<Shared<C>> {
        let kind = self.registry.kind_of::<C>()?;
        self.components
            .get(entity, kind)
            .cloned()
            .and_then(downcast_ref::<C>)
    }

    /// Returns true if `entity` has a `C` component.
    #[must_use]
    pub fn has<C: Component>(&self, entity: EntityId) -> bool {
        self.registry
            .kind_of::<C>()
            .is_some_and(|kind| self.components.contains(entity, kind))
    }

    /// Returns the kinds attached to `entity`.
    #[must_use]
    pub fn kinds_of(&self, entity: EntityId) -> Vec<ComponentKind> {
        self.components.kinds_of(entity)
    }

    // --- Accessors ---

    /// Returns the kind registry.
    #[must_use]
    pub fn registry(&self) -> &KindRegistry {
        &self.registry
    }

    /// Returns the kind registry mutably, for building family schemas.
    pub fn registry_mut(&mut self) -> &mut KindRegistry {
        &mut self.registry
    }

    /// Returns the component store.
    #[must_use]
    pub fn components(&self) -> &ComponentStore {
        &self.components
    }
}

impl ComponentSource for World {
    fn has_component(&self, entity: EntityId, kind: ComponentKind) -> bool {
        self.components.contains(entity, kind)
    }

    fn get_component(&self, entity: EntityId, kind: ComponentKind) -> Option<ComponentRef> {
        self.components.get(entity, kind).cloned()
    }
}
