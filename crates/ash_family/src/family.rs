//! Families: the matching engine for one node shape.
//!
//! A family reacts to four notifications (entity added/removed, component
//! added/removed) and keeps its match table equal to the set of entities that
//! have every component its schema requires. It never scans storage on its
//! own; the only reads happen while testing one entity for a match.

use std::any::Any;
use std::collections::HashSet;
use std::fmt;

use ash_foundation::{ComponentKind, ComponentRef, ComponentSource, EntityId, Error, KindRegistry, Result};
use tracing::{trace, warn};

use crate::config::{BindPolicy, FamilyConfig};
use crate::pool::{NodePool, RecyclingPool};
use crate::schema::Schema;
use crate::shape::NodeShape;
use crate::table::MatchTable;

/// The set of entities matching node shape `N`, each with a bound node.
pub struct Family<N: NodeShape, P: NodePool<N> = RecyclingPool<N>> {
    schema: Schema<N>,
    table: MatchTable<N>,
    pool: P,
    config: FamilyConfig,
    /// Entities added and not yet removed, matched or not.
    tracked: HashSet<EntityId>,
    /// Reused buffer for handles fetched during a match attempt.
    scratch: Vec<ComponentRef>,
}

impl<N: NodeShape> Family<N> {
    /// Creates a family with the default pool and configuration.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateSlot` if `N` declares one component twice.
    pub fn new(registry: &mut KindRegistry) -> Result<Self> {
        Self::with_config(registry, FamilyConfig::default())
    }

    /// Creates a family with the default pool sized by `config`.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateSlot` if `N` declares one component twice.
    pub fn with_config(registry: &mut KindRegistry, config: FamilyConfig) -> Result<Self> {
        let mut pool = match config.pool_max_retained {
            Some(max) => RecyclingPool::bounded(max),
            None => RecyclingPool::new(),
        };
        pool.prewarm(config.pool_prewarm);
        Self::with_pool(registry, pool, config)
    }
}

impl<N: NodeShape, P: NodePool<N>> Family<N, P> {
    /// Creates a family drawing its nodes from `pool`.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateSlot` if `N` declares one component twice.
    pub fn with_pool(registry: &mut KindRegistry, pool: P, config: FamilyConfig) -> Result<Self> {
        let schema = Schema::build(registry)?;
        let scratch = Vec::with_capacity(schema.len());
        Ok(Self {
            schema,
            table: MatchTable::new(),
            pool,
            config,
            tracked: HashSet::new(),
            scratch,
        })
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Handles an entity joining the world.
    ///
    /// # Errors
    ///
    /// Returns `StateViolation` if the entity was already added and not
    /// removed since, or is currently matched. The family is left unchanged.
    pub fn entity_added<S>(&mut self, source: &S, entity: EntityId) -> Result<()>
    where
        S: ComponentSource + ?Sized,
    {
        if self.table.contains(entity) || !self.tracked.insert(entity) {
            return Err(
                Error::state_violation(entity, "entity already added to family")
                    .with_context(self.schema.node_name()),
            );
        }
        self.attempt_match(source, entity);
        Ok(())
    }

    /// Handles an entity leaving the world. No-op if it is not tracked.
    pub fn entity_removed(&mut self, entity: EntityId) {
        self.tracked.remove(&entity);
        self.unmatch(entity);
    }

    /// Handles a component of `kind` being attached to `entity`.
    ///
    /// A matched entity keeps its node; with [`BindPolicy::Refresh`] the slot
    /// for `kind` is rebound to the entity's current instance.
    pub fn component_added<S>(&mut self, source: &S, entity: EntityId, kind: ComponentKind)
    where
        S: ComponentSource + ?Sized,
    {
        if self.table.contains(entity) {
            if self.config.bind_policy == BindPolicy::Refresh {
                self.refresh_slot(source, entity, kind);
            }
            return;
        }
        self.attempt_match(source, entity);
    }

    /// Handles a component of `kind` being detached from `entity`.
    ///
    /// Losing any required kind always breaks the match, so the entity is
    /// dropped without looking at its other components.
    pub fn component_removed(&mut self, entity: EntityId, kind: ComponentKind) {
        if !self.table.contains(entity) || !self.schema.contains(kind) {
            return;
        }
        self.unmatch(entity);
    }

    // =========================================================================
    // Matching
    // =========================================================================

    /// Binds a node for `entity` if it has every required component.
    ///
    /// Returns true on a new match. Nothing is acquired from the pool unless
    /// every handle has been fetched.
    fn attempt_match<S>(&mut self, source: &S, entity: EntityId) -> bool
    where
        S: ComponentSource + ?Sized,
    {
        if !self
            .schema
            .kinds()
            .all(|kind| source.has_component(entity, kind))
        {
            return false;
        }

        self.scratch.clear();
        for binding in self.schema.bindings() {
            let Some(handle) = source.get_component(entity, binding.kind()) else {
                warn!(
                    ?entity,
                    component = binding.component(),
                    node = self.schema.node_name(),
                    "component reported present but could not be fetched"
                );
                self.scratch.clear();
                return false;
            };
            self.scratch.push(handle);
        }

        let mut node = self.pool.acquire();
        for (binding, handle) in self.schema.bindings().iter().zip(self.scratch.drain(..)) {
            if !binding.bind(&mut node, handle) {
                warn!(
                    ?entity,
                    component = binding.component(),
                    node = self.schema.node_name(),
                    "component handle has the wrong type for its kind"
                );
                self.pool.release(node);
                return false;
            }
        }

        self.table.insert(entity, node);
        trace!(?entity, node = self.schema.node_name(), matched = self.table.len(), "entity matched");
        true
    }

    /// Rebinds the slot for `kind` on a matched entity.
    fn refresh_slot<S>(&mut self, source: &S, entity: EntityId, kind: ComponentKind)
    where
        S: ComponentSource + ?Sized,
    {
        let Some(binding) = self.schema.binding(kind) else {
            return;
        };
        let Some(handle) = source.get_component(entity, kind) else {
            return;
        };
        if let Some(node) = self.table.get_mut(entity) {
            if binding.bind(node, handle) {
                trace!(?entity, component = binding.component(), "slot rebound");
            }
        }
    }

    /// Drops `entity` from the table and returns its node to the pool.
    fn unmatch(&mut self, entity: EntityId) {
        if let Some(node) = self.table.remove(entity) {
            self.pool.release(node);
            trace!(?entity, node = self.schema.node_name(), matched = self.table.len(), "entity unmatched");
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Returns the matched nodes.
    ///
    /// The order is unspecified and changes whenever the family does.
    #[must_use]
    pub fn nodes(&self) -> &[N] {
        self.table.nodes()
    }

    /// Returns the matched nodes mutably.
    pub fn nodes_mut(&mut self) -> &mut [N] {
        self.table.nodes_mut()
    }

    /// Iterates over matched (entity, node) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &N)> + '_ {
        self.table.iter()
    }

    /// Iterates over matched (entity, node) pairs with mutable nodes.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut N)> + '_ {
        self.table.iter_mut()
    }

    /// Returns the node bound for `entity`.
    #[must_use]
    pub fn node(&self, entity: EntityId) -> Option<&N> {
        self.table.get(entity)
    }

    /// Returns true if `entity` currently matches.
    #[must_use]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.table.contains(entity)
    }

    /// Returns true if `entity` has been added and not removed.
    #[must_use]
    pub fn is_tracked(&self, entity: EntityId) -> bool {
        self.tracked.contains(&entity)
    }

    /// Returns the number of matched entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns true if no entity matches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the schema.
    #[must_use]
    pub fn schema(&self) -> &Schema<N> {
        &self.schema
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &FamilyConfig {
        &self.config
    }

    /// Returns the pool.
    #[must_use]
    pub fn pool(&self) -> &P {
        &self.pool
    }

    /// Releases every node and forgets every entity.
    pub fn clear(&mut self) {
        for node in self.table.drain() {
            self.pool.release(node);
        }
        self.tracked.clear();
    }

    /// Clears the family and hands back its pool.
    pub fn into_pool(mut self) -> P {
        self.clear();
        self.pool
    }
}

impl<N: NodeShape, P: NodePool<N>> fmt::Debug for Family<N, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Family")
            .field("node", &self.schema.node_name())
            .field("matched", &self.table.len())
            .field("tracked", &self.tracked.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Observer
// =============================================================================

/// Object-safe view of a family, for dispatching notifications to families
/// of different node shapes.
pub trait FamilyObserver {
    /// See [`Family::entity_added`].
    ///
    /// # Errors
    ///
    /// Returns `StateViolation` on duplicate registration.
    fn entity_added(&mut self, source: &dyn ComponentSource, entity: EntityId) -> Result<()>;

    /// See [`Family::entity_removed`].
    fn entity_removed(&mut self, entity: EntityId);

    /// See [`Family::component_added`].
    fn component_added(&mut self, source: &dyn ComponentSource, entity: EntityId, kind: ComponentKind);

    /// See [`Family::component_removed`].
    fn component_removed(&mut self, entity: EntityId, kind: ComponentKind);

    /// Releases every node and forgets every entity.
    fn clear(&mut self);

    /// Returns the number of matched entities.
    fn matched(&self) -> usize;

    /// Returns the node shape's short type name.
    fn node_name(&self) -> &'static str;

    /// Upcasts for downcasting to the concrete family.
    fn as_any(&self) -> &dyn Any;

    /// Upcasts for downcasting to the concrete family.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<N: NodeShape, P: NodePool<N> + 'static> FamilyObserver for Family<N, P> {
    fn entity_added(&mut self, source: &dyn ComponentSource, entity: EntityId) -> Result<()> {
        Family::entity_added(self, source, entity)
    }

    fn entity_removed(&mut self, entity: EntityId) {
        Family::entity_removed(self, entity);
    }

    fn component_added(&mut self, source: &dyn ComponentSource, entity: EntityId, kind: ComponentKind) {
        Family::component_added(self, source, entity, kind);
    }

    fn component_removed(&mut self, entity: EntityId, kind: ComponentKind) {
        Family::component_removed(self, entity, kind);
    }

    fn clear(&mut self) {
        Family::clear(self);
    }

    fn matched(&self) -> usize {
        self.len()
    }

    fn node_name(&self) -> &'static str {
        self.schema.node_name()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
