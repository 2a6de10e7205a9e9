//! Component handles and the storage view consumed by families.
//!
//! Components live behind shared handles owned by the entity store. Families
//! never copy a component; they hold clones of its handle, so a node slot and
//! the store always see the same instance.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use crate::entity::EntityId;
use crate::kind::ComponentKind;

/// Marker for types that can be attached to entities.
pub trait Component: 'static {}

impl<T: 'static> Component for T {}

/// Shared, interiorly mutable handle to a component instance.
///
/// Systems mutate components through `borrow_mut` while the store keeps
/// ownership of the instance.
pub type Shared<C> = Rc<RefCell<C>>;

/// Type-erased component handle.
///
/// Always wraps a `RefCell<C>` for the component type `C` the handle was
/// created for; see [`share`] and [`downcast_ref`].
pub type ComponentRef = Rc<dyn Any>;

/// Wraps a component value in a fresh shared handle.
#[must_use]
pub fn share<C: Component>(value: C) -> Shared<C> {
    Rc::new(RefCell::new(value))
}

/// Recovers the typed handle from an erased one.
///
/// Returns `None` if the handle does not hold a `C`.
#[must_use]
pub fn downcast_ref<C: Component>(handle: ComponentRef) -> Option<Shared<C>> {
    handle.downcast::<RefCell<C>>().ok()
}

/// Read-only view of entity/component storage.
///
/// This is everything a family needs from the outside world: a presence test
/// and a fetch. Implementations must answer consistently within one event;
/// a kind reported present must be fetchable.
pub trait ComponentSource {
    /// Returns true if `entity` currently has a component of `kind`.
    fn has_component(&self, entity: EntityId, kind: ComponentKind) -> bool;

    /// Returns a handle to the component of `kind` on `entity`, if present.
    fn get_component(&self, entity: EntityId, kind: ComponentKind) -> Option<ComponentRef>;
}

impl<S: ComponentSource + ?Sized> ComponentSource for &S {
    fn has_component(&self, entity: EntityId, kind: ComponentKind) -> bool {
        (**self).has_component(entity, kind)
    }

    fn get_component(&self, entity: EntityId, kind: ComponentKind) -> Option<ComponentRef> {
        (**self).get_component(entity, kind)
    }
}
