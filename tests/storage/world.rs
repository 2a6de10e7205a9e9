//! Integration tests for World
//!
//! Tests component attachment, replacement, and despawn cleanup.

use std::rc::Rc;

use ash_foundation::ComponentSource;
use ash_storage::World;

#[derive(Debug, PartialEq)]
struct Name(&'static str);

#[derive(Debug, PartialEq)]
struct Score(u32);

// =============================================================================
// Components
// =============================================================================

#[test]
fn insert_and_get_share_the_instance() {
    let mut world = World::new();
    let e = world.spawn();
    let handle = world.insert(e, Score(1)).unwrap();

    handle.borrow_mut().0 = 10;

    let fetched = world.get::<Score>(e).unwrap();
    assert!(Rc::ptr_eq(&handle, &fetched));
    assert_eq!(*fetched.borrow(), Score(10));
}

#[test]
fn insert_replaces_existing_component() {
    let mut world = World::new();
    let e = world.spawn();
    let first = world.insert(e, Score(1)).unwrap();
    let second = world.insert(e, Score(2)).unwrap();

    let current = world.get::<Score>(e).unwrap();
    assert!(Rc::ptr_eq(&current, &second));
    assert!(!Rc::ptr_eq(&current, &first));
    assert_eq!(world.kinds_of(e).len(), 1);
}

#[test]
fn remove_returns_detached_component() {
    let mut world = World::new();
    let e = world.spawn();
    world.insert(e, Name("ash")).unwrap();

    let removed = world.remove::<Name>(e).unwrap().unwrap();
    assert_eq!(*removed.borrow(), Name("ash"));
    assert!(!world.has::<Name>(e));
    assert!(world.remove::<Name>(e).unwrap().is_none());
}

#[test]
fn remove_of_never_registered_kind_is_none() {
    let mut world = World::new();
    let e = world.spawn();
    assert!(world.remove::<Score>(e).unwrap().is_none());
}

#[test]
fn dead_entities_reject_components() {
    let mut world = World::new();
    let e = world.spawn();
    world.despawn(e).unwrap();

    assert!(world.insert(e, Score(1)).is_err());
    assert!(world.remove::<Score>(e).is_err());
}

// =============================================================================
// Despawn
// =============================================================================

#[test]
fn despawn_drops_all_components() {
    let mut world = World::new();
    let e = world.spawn();
    world.insert(e, Score(1)).unwrap();
    world.insert(e, Name("gone")).unwrap();
    let score = world.kind::<Score>();

    world.despawn(e).unwrap();

    assert!(!world.exists(e));
    assert!(world.kinds_of(e).is_empty());
    assert_eq!(world.components().count(score), 0);
}

#[test]
fn respawned_index_starts_empty() {
    let mut world = World::new();
    let a = world.spawn();
    world.insert(a, Score(1)).unwrap();
    world.despawn(a).unwrap();

    let b = world.spawn();
    assert_eq!(a.index, b.index);
    assert!(!world.has::<Score>(b));
}

// =============================================================================
// Component source
// =============================================================================

#[test]
fn world_answers_component_queries_by_kind() {
    let mut world = World::new();
    let e = world.spawn();
    world.insert(e, Score(3)).unwrap();
    let score = world.kind::<Score>();
    let name = world.kind::<Name>();

    assert!(world.has_component(e, score));
    assert!(!world.has_component(e, name));
    assert!(world.get_component(e, score).is_some());
    assert!(world.get_component(e, name).is_none());
}
