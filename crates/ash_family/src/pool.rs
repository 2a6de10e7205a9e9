//! Node pools.
//!
//! A family never constructs or drops nodes itself: it acquires one from its
//! pool when an entity starts matching and hands it back when the entity
//! stops. Ownership moves with the node, so a node is held by exactly one of
//! the pool or the match table at a time.

/// Allocates and recycles nodes for a family.
///
/// A released node keeps whatever slot contents it had. Families rebind every
/// slot after `acquire`, so implementations need not reset nodes.
pub trait NodePool<N> {
    /// Hands out a node, reusing an idle one or allocating a new one.
    fn acquire(&mut self) -> N;

    /// Takes back a node that is no longer matched.
    fn release(&mut self, node: N);
}

impl<N, P: NodePool<N> + ?Sized> NodePool<N> for Box<P> {
    fn acquire(&mut self) -> N {
        (**self).acquire()
    }

    fn release(&mut self, node: N) {
        (**self).release(node);
    }
}

/// Counters kept by [`RecyclingPool`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Nodes handed out.
    pub acquired: u64,
    /// Nodes taken back.
    pub released: u64,
    /// Acquisitions served by allocating a new node.
    pub allocated: u64,
    /// Acquisitions served from the idle list.
    pub recycled: u64,
    /// Released nodes dropped because the idle list was full.
    pub discarded: u64,
}

impl PoolStats {
    /// Returns the number of nodes currently handed out.
    #[must_use]
    pub fn outstanding(&self) -> u64 {
        self.acquired - self.released
    }
}

/// Free-list pool that allocates with `Default`.
#[derive(Debug)]
pub struct RecyclingPool<N> {
    /// Idle nodes, most recently released last.
    idle: Vec<N>,
    /// Cap on `idle`; `None` keeps every released node.
    max_retained: Option<usize>,
    stats: PoolStats,
}

impl<N> Default for RecyclingPool<N> {
    fn default() -> Self {
        Self {
            idle: Vec::new(),
            max_retained: None,
            stats: PoolStats::default(),
        }
    }
}

impl<N: Default> RecyclingPool<N> {
    /// Creates an empty, unbounded pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a pool keeping at most `max_retained` idle nodes.
    #[must_use]
    pub fn bounded(max_retained: usize) -> Self {
        Self {
            max_retained: Some(max_retained),
            ..Self::default()
        }
    }

    /// Allocates `count` idle nodes up front, within the retention cap.
    pub fn prewarm(&mut self, count: usize) {
        let room = self
            .max_retained
            .map_or(count, |max| max.saturating_sub(self.idle.len()).min(count));
        self.idle.reserve(room);
        self.idle.extend(std::iter::repeat_with(N::default).take(room));
    }

    /// Returns the number of idle nodes.
    #[must_use]
    pub fn idle(&self) -> usize {
        self.idle.len()
    }

    /// Returns the pool's counters.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        self.stats
    }

    /// Drops every idle node.
    pub fn shrink(&mut self) {
        self.idle.clear();
        self.idle.shrink_to_fit();
    }
}

impl<N: Default> NodePool<N> for RecyclingPool<N> {
    fn acquire(&mut self) -> N {
        self.stats.acquired += 1;
        if let Some(node) = self.idle.pop() {
            self.stats.recycled += 1;
            node
        } else {
            self.stats.allocated += 1;
            N::default()
        }
    }

    fn release(&mut self, node: N) {
        self.stats.released += 1;
        if self.max_retained.is_some_and(|max| self.idle.len() >= max) {
            self.stats.discarded += 1;
            return;
        }
        self.idle.push(node);
    }
}
