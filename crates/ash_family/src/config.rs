//! Configuration for node families.

/// What a family does when a component is added to an entity it already
/// matches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BindPolicy {
    /// Slots are bound only when the entity starts matching. Replacing a
    /// required component leaves the node pointing at the old instance.
    #[default]
    OnMatch,
    /// Adding a required component to a matched entity rebinds that slot to
    /// the entity's current instance.
    Refresh,
}

/// Configuration for a [`Family`](crate::Family) and its default pool.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FamilyConfig {
    /// Slot binding behaviour for already-matched entities.
    pub bind_policy: BindPolicy,

    /// Nodes the default pool allocates up front.
    pub pool_prewarm: usize,

    /// Cap on idle nodes the default pool keeps; `None` keeps all.
    pub pool_max_retained: Option<usize>,
}

impl FamilyConfig {
    /// Creates a configuration that rebinds slots when components are replaced.
    #[must_use]
    pub fn refreshing() -> Self {
        Self {
            bind_policy: BindPolicy::Refresh,
            ..Self::default()
        }
    }

    /// Builder method to set the bind policy.
    #[must_use]
    pub fn with_bind_policy(mut self, policy: BindPolicy) -> Self {
        self.bind_policy = policy;
        self
    }

    /// Builder method to set the number of prewarmed nodes.
    #[must_use]
    pub fn with_pool_prewarm(mut self, count: usize) -> Self {
        self.pool_prewarm = count;
        self
    }

    /// Builder method to cap idle nodes kept by the pool.
    #[must_use]
    pub fn with_pool_max_retained(mut self, max: usize) -> Self {
        self.pool_max_retained = Some(max);
        self
    }
}
