//! Node shapes: the declared set of component slots a family fills in.
//!
//! A node shape is a plain struct of [`Slot`]s plus a [`NodeShape::declare`]
//! implementation listing each slot together with the accessor that reaches
//! it. The declaration runs once, when the family's schema is built.
//!
//! ```
//! use ash_family::{NodeShape, Slot, SlotDeclarations};
//!
//! struct Position(f32, f32);
//! struct Velocity(f32, f32);
//!
//! #[derive(Default)]
//! struct MoveNode {
//!     position: Slot<Position>,
//!     velocity: Slot<Velocity>,
//! }
//!
//! impl NodeShape for MoveNode {
//!     fn declare(slots: &mut SlotDeclarations<'_, Self>) {
//!         slots
//!             .slot(|node| &mut node.position)
//!             .slot(|node| &mut node.velocity);
//!     }
//! }
//! ```

use std::cell::{Ref, RefMut};
use std::fmt;
use std::rc::Rc;

use ash_foundation::{Component, ComponentKind, ComponentRef, KindRegistry, Shared, downcast_ref};

/// A reference-valued node slot holding one component handle.
///
/// A slot stays bound after its node is released to the pool; the next match
/// overwrites it. Nodes observed through a family are always fully bound.
pub struct Slot<C> {
    handle: Option<Shared<C>>,
}

impl<C> Default for Slot<C> {
    fn default() -> Self {
        Self { handle: None }
    }
}

impl<C: Component> Slot<C> {
    /// Borrows the bound component.
    ///
    /// # Panics
    ///
    /// Panics if the component is already mutably borrowed.
    #[must_use]
    pub fn get(&self) -> Option<Ref<'_, C>> {
        self.handle.as_ref().map(|handle| handle.borrow())
    }

    /// Mutably borrows the bound component.
    ///
    /// # Panics
    ///
    /// Panics if the component is already borrowed.
    #[must_use]
    pub fn get_mut(&self) -> Option<RefMut<'_, C>> {
        self.handle.as_ref().map(|handle| handle.borrow_mut())
    }

    /// Returns the bound handle.
    #[must_use]
    pub fn handle(&self) -> Option<&Shared<C>> {
        self.handle.as_ref()
    }

    /// Returns true if a handle is bound.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.handle.is_some()
    }

    /// Returns true if this slot references exactly `instance`.
    #[must_use]
    pub fn points_to(&self, instance: &Shared<C>) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| Rc::ptr_eq(handle, instance))
    }

    pub(crate) fn bind(&mut self, handle: Shared<C>) {
        self.handle = Some(handle);
    }
}

impl<C> fmt::Debug for Slot<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.handle.is_some() {
            write!(f, "Slot(bound)")
        } else {
            write!(f, "Slot(unbound)")
        }
    }
}

/// The node type a family maintains.
///
/// Nodes are created through `Default` and recycled by a pool, so a node
/// handed out by the pool may carry stale slots from an earlier match.
pub trait NodeShape: Default + 'static {
    /// Lists every slot of the node and the accessor that reaches it.
    fn declare(slots: &mut SlotDeclarations<'_, Self>);
}

/// One declared slot: its component kind and how to bind it.
pub struct SlotBinding<N> {
    pub(crate) kind: ComponentKind,
    pub(crate) component: &'static str,
    binder: Box<dyn Fn(&mut N, ComponentRef) -> bool>,
}

impl<N> SlotBinding<N> {
    /// Returns the component kind this slot requires.
    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Returns the component's short type name.
    #[must_use]
    pub fn component(&self) -> &'static str {
        self.component
    }

    /// Binds `handle` into this slot of `node`.
    ///
    /// Returns false, leaving the node untouched, if the handle does not hold
    /// this slot's component type.
    pub(crate) fn bind(&self, node: &mut N, handle: ComponentRef) -> bool {
        (self.binder)(node, handle)
    }
}

impl<N> fmt::Debug for SlotBinding<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotBinding")
            .field("kind", &self.kind)
            .field("component", &self.component)
            .finish_non_exhaustive()
    }
}

/// Collects slot declarations while a schema is built.
pub struct SlotDeclarations<'r, N> {
    registry: &'r mut KindRegistry,
    pub(crate) bindings: Vec<SlotBinding<N>>,
    /// First component declared twice, if any.
    pub(crate) duplicate: Option<&'static str>,
}

impl<'r, N: 'static> SlotDeclarations<'r, N> {
    pub(crate) fn new(registry: &'r mut KindRegistry) -> Self {
        Self {
            registry,
            bindings: Vec::new(),
            duplicate: None,
        }
    }

    /// Declares a slot for component `C`, reached through `accessor`.
    pub fn slot<C: Component>(&mut self, accessor: fn(&mut N) -> &mut Slot<C>) -> &mut Self {
        let kind = self.registry.register::<C>();
        let component = self.registry.name(kind).unwrap_or("?");

        if self.bindings.iter().any(|binding| binding.kind == kind) {
            if self.duplicate.is_none() {
                self.duplicate = Some(component);
            }
            return self;
        }

        self.bindings.push(SlotBinding {
            kind,
            component,
            binder: Box::new(move |node: &mut N, handle: ComponentRef| match downcast_ref::<C>(handle) {
                Some(typed) => {
                    accessor(node).bind(typed);
                    true
                }
                None => false,
            }),
        });
        self
    }
}
