//! Schema descriptors: the required component kinds of a node shape.

use std::fmt;

use ash_foundation::{ComponentKind, Error, KindRegistry, Result, short_type_name};
use tracing::debug;

use crate::shape::{NodeShape, SlotBinding, SlotDeclarations};

/// The component kinds a node shape requires and the slot each one binds.
///
/// Built once per family and immutable afterwards. Lookup by kind goes
/// through a table indexed by [`ComponentKind::as_usize`].
pub struct Schema<N> {
    node: &'static str,
    bindings: Vec<SlotBinding<N>>,
    /// Kind index -> position in `bindings`.
    by_kind: Vec<Option<usize>>,
}

impl<N: NodeShape> Schema<N> {
    /// Builds the schema for `N`, registering its component kinds.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateSlot` if `N` declares two slots for one component.
    pub fn build(registry: &mut KindRegistry) -> Result<Self> {
        let node = short_type_name::<N>();
        let mut declarations = SlotDeclarations::new(registry);
        N::declare(&mut declarations);

        if let Some(component) = declarations.duplicate {
            return Err(Error::duplicate_slot(node, component));
        }

        let bindings = declarations.bindings;
        let table_len = bindings.iter().map(|b| b.kind.as_usize() + 1).max().unwrap_or(0);
        let mut by_kind = vec![None; table_len];
        for (position, binding) in bindings.iter().enumerate() {
            by_kind[binding.kind.as_usize()] = Some(position);
        }

        debug!(
            node,
            slots = bindings.len(),
            components = ?bindings.iter().map(SlotBinding::component).collect::<Vec<_>>(),
            "built node schema"
        );

        Ok(Self {
            node,
            bindings,
            by_kind,
        })
    }
}

impl<N> Schema<N> {
    /// Returns the node shape's short type name.
    #[must_use]
    pub fn node_name(&self) -> &'static str {
        self.node
    }

    /// Returns true if `kind` is one of the required kinds.
    #[must_use]
    pub fn contains(&self, kind: ComponentKind) -> bool {
        self.by_kind
            .get(kind.as_usize())
            .is_some_and(Option::is_some)
    }

    /// Returns the slot that binds `kind`.
    #[must_use]
    pub fn binding(&self, kind: ComponentKind) -> Option<&SlotBinding<N>> {
        let position = (*self.by_kind.get(kind.as_usize())?)?;
        self.bindings.get(position)
    }

    /// Returns every slot in declaration order.
    #[must_use]
    pub fn bindings(&self) -> &[SlotBinding<N>] {
        &self.bindings
    }

    /// Iterates over the required kinds in declaration order.
    pub fn kinds(&self) -> impl Iterator<Item = ComponentKind> + '_ {
        self.bindings.iter().map(SlotBinding::kind)
    }

    /// Returns the number of required kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if the shape requires nothing, so every entity matches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<N> fmt::Debug for Schema<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("node", &self.node)
            .field("bindings", &self.bindings)
            .finish()
    }
}
