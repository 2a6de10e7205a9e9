//! End-to-end matching scenarios
//!
//! Walks a family through the lifecycle of matching entities.

use ash_family::{Family, FamilyConfig};
use ash_storage::World;

use crate::shapes::{Health, MoveNode, Position, Velocity, position, velocity};

// =============================================================================
// Matching on entity addition
// =============================================================================

#[test]
fn entity_with_all_components_matches() {
    let mut world = World::new();
    let e = world.spawn();
    let pos = world.insert(e, position(1.0, 2.0)).unwrap();
    let vel = world.insert(e, velocity(0.5, 0.0)).unwrap();

    let mut family = Family::<MoveNode>::new(world.registry_mut()).unwrap();
    family.entity_added(&world, e).unwrap();

    assert_eq!(family.len(), 1);
    let node = family.node(e).unwrap();
    assert!(node.position.points_to(&pos));
    assert!(node.velocity.points_to(&vel));
}

#[test]
fn entity_missing_a_component_is_tracked_but_not_matched() {
    let mut world = World::new();
    let e = world.spawn();
    world.insert(e, position(0.0, 0.0)).unwrap();
    world.insert(e, Health(10)).unwrap();

    let mut family = Family::<MoveNode>::new(world.registry_mut()).unwrap();
    family.entity_added(&world, e).unwrap();

    assert!(family.is_empty());
    assert!(family.is_tracked(e));
    assert!(family.node(e).is_none());
}

#[test]
fn nodes_share_component_instances_with_world() {
    let mut world = World::new();
    let e = world.spawn();
    world.insert(e, position(0.0, 0.0)).unwrap();
    world.insert(e, velocity(2.0, 3.0)).unwrap();

    let mut family = Family::<MoveNode>::new(world.registry_mut()).unwrap();
    family.entity_added(&world, e).unwrap();

    for node in family.nodes() {
        let v = *node.velocity.get().unwrap();
        let mut p = node.position.get_mut().unwrap();
        p.x += v.dx;
        p.y += v.dy;
    }

    assert_eq!(*world.get::<Position>(e).unwrap().borrow(), position(2.0, 3.0));
}

// =============================================================================
// Component changes
// =============================================================================

#[test]
fn adding_last_required_component_matches() {
    let mut world = World::new();
    let e = world.spawn();
    world.insert(e, position(0.0, 0.0)).unwrap();

    let mut family = Family::<MoveNode>::new(world.registry_mut()).unwrap();
    family.entity_added(&world, e).unwrap();
    assert!(family.is_empty());

    let vel = world.insert(e, velocity(1.0, 1.0)).unwrap();
    let kind = world.kind::<Velocity>();
    family.component_added(&world, e, kind);

    assert!(family.contains(e));
    assert!(family.node(e).unwrap().velocity.points_to(&vel));
}

#[test]
fn removing_required_component_unmatches() {
    let mut world = World::new();
    let e = world.spawn();
    world.insert(e, position(0.0, 0.0)).unwrap();
    world.insert(e, velocity(1.0, 1.0)).unwrap();

    let mut family = Family::<MoveNode>::new(world.registry_mut()).unwrap();
    family.entity_added(&world, e).unwrap();

    world.remove::<Velocity>(e).unwrap();
    let kind = world.kind::<Velocity>();
    family.component_removed(e, kind);

    assert!(family.is_empty());
    assert!(family.is_tracked(e));
}

#[test]
fn removing_unrelated_component_keeps_match() {
    let mut world = World::new();
    let e = world.spawn();
    world.insert(e, position(0.0, 0.0)).unwrap();
    world.insert(e, velocity(1.0, 1.0)).unwrap();
    world.insert(e, Health(3)).unwrap();

    let mut family = Family::<MoveNode>::new(world.registry_mut()).unwrap();
    family.entity_added(&world, e).unwrap();

    world.remove::<Health>(e).unwrap();
    let kind = world.kind::<Health>();
    family.component_removed(e, kind);

    assert!(family.contains(e));
}

#[test]
fn replacing_component_keeps_stale_binding_by_default() {
    let mut world = World::new();
    let e = world.spawn();
    world.insert(e, position(0.0, 0.0)).unwrap();
    let first = world.insert(e, velocity(1.0, 0.0)).unwrap();

    let mut family = Family::<MoveNode>::new(world.registry_mut()).unwrap();
    family.entity_added(&world, e).unwrap();

    let second = world.insert(e, velocity(9.0, 9.0)).unwrap();
    let kind = world.kind::<Velocity>();
    family.component_added(&world, e, kind);

    let node = family.node(e).unwrap();
    assert!(node.velocity.points_to(&first));
    assert!(!node.velocity.points_to(&second));
}

#[test]
fn replacing_component_rebinds_with_refresh_policy() {
    let mut world = World::new();
    let e = world.spawn();
    world.insert(e, position(0.0, 0.0)).unwrap();
    world.insert(e, velocity(1.0, 0.0)).unwrap();

    let mut family =
        Family::<MoveNode>::with_config(world.registry_mut(), FamilyConfig::refreshing()).unwrap();
    family.entity_added(&world, e).unwrap();

    let second = world.insert(e, velocity(9.0, 9.0)).unwrap();
    let kind = world.kind::<Velocity>();
    family.component_added(&world, e, kind);

    assert!(family.node(e).unwrap().velocity.points_to(&second));
    assert_eq!(family.len(), 1);
}

// =============================================================================
// Entity removal
// =============================================================================

#[test]
fn removing_entity_forgets_it() {
    let mut world = World::new();
    let e = world.spawn();
    world.insert(e, position(0.0, 0.0)).unwrap();
    world.insert(e, velocity(1.0, 1.0)).unwrap();

    let mut family = Family::<MoveNode>::new(world.registry_mut()).unwrap();
    family.entity_added(&world, e).unwrap();
    family.entity_removed(e);

    assert!(family.is_empty());
    assert!(!family.is_tracked(e));

    // Removing again is harmless.
    family.entity_removed(e);
    assert!(family.is_empty());
}

#[test]
fn entity_can_be_added_again_after_removal() {
    let mut world = World::new();
    let e = world.spawn();
    world.insert(e, position(0.0, 0.0)).unwrap();
    world.insert(e, velocity(1.0, 1.0)).unwrap();

    let mut family = Family::<MoveNode>::new(world.registry_mut()).unwrap();
    family.entity_added(&world, e).unwrap();
    family.entity_removed(e);
    family.entity_added(&world, e).unwrap();

    assert!(family.contains(e));
}

#[test]
fn many_entities_match_independently() {
    let mut world = World::new();
    let mut movers = Vec::new();
    for i in 0..20 {
        let e = world.spawn();
        world.insert(e, position(0.0, 0.0)).unwrap();
        if i % 2 == 0 {
            world.insert(e, velocity(1.0, 1.0)).unwrap();
            movers.push(e);
        }
    }

    let mut family = Family::<MoveNode>::new(world.registry_mut()).unwrap();
    let entities: Vec<_> = world.entities().collect();
    for e in entities {
        family.entity_added(&world, e).unwrap();
    }

    assert_eq!(family.len(), movers.len());
    for e in &movers {
        assert!(family.contains(*e));
    }
}

#[test]
fn iter_mut_visits_each_matched_entity_once() {
    let mut world = World::new();
    let entities: Vec<_> = (0..3)
        .map(|i| {
            let e = world.spawn();
            world.insert(e, position(0.0, 0.0)).unwrap();
            world.insert(e, velocity(1.0, 0.0)).unwrap();
            if i == 1 {
                world.remove::<Velocity>(e).unwrap();
            }
            e
        })
        .collect();

    let mut family = Family::<MoveNode>::new(world.registry_mut()).unwrap();
    for e in &entities {
        family.entity_added(&world, *e).unwrap();
    }

    let mut visited: Vec<_> = family.iter_mut().map(|(entity, _)| entity).collect();
    visited.sort();
    assert_eq!(visited, vec![entities[0], entities[2]]);
}
