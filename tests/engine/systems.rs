//! Systems over families
//!
//! Tests the iteration pattern a system uses: fetch nodes, mutate through
//! slots, and observe the changes on the world.

use ash_engine::Engine;

use crate::{Frozen, MoveNode, Position, Velocity};

fn integrate(engine: &mut Engine) {
    for node in engine.nodes_mut::<MoveNode>().unwrap() {
        let velocity = *node.velocity.get().unwrap();
        let mut position = node.position.get_mut().unwrap();
        position.x += velocity.dx;
        position.y += velocity.dy;
    }
}

#[test]
fn movement_system_updates_world_components() {
    let mut engine = Engine::new();
    let e = engine.spawn().unwrap();
    engine.insert(e, Position { x: 0.0, y: 0.0 }).unwrap();
    engine.insert(e, Velocity { dx: 1.0, dy: 2.0 }).unwrap();

    for _ in 0..3 {
        integrate(&mut engine);
    }

    let position = engine.get::<Position>(e).unwrap();
    assert_eq!(*position.borrow(), Position { x: 3.0, y: 6.0 });
}

#[test]
fn entities_join_and_leave_between_ticks() {
    let mut engine = Engine::new();
    let a = engine.spawn().unwrap();
    engine.insert(a, Position { x: 0.0, y: 0.0 }).unwrap();
    engine.insert(a, Velocity { dx: 1.0, dy: 0.0 }).unwrap();

    integrate(&mut engine);

    let b = engine.spawn().unwrap();
    engine.insert(b, Position { x: 10.0, y: 0.0 }).unwrap();
    engine.insert(b, Velocity { dx: -1.0, dy: 0.0 }).unwrap();
    engine.remove::<Velocity>(a).unwrap();

    integrate(&mut engine);

    assert_eq!(engine.get::<Position>(a).unwrap().borrow().x, 1.0);
    assert_eq!(engine.get::<Position>(b).unwrap().borrow().x, 9.0);
}

#[test]
fn unrelated_components_do_not_disturb_nodes() {
    let mut engine = Engine::new();
    let e = engine.spawn().unwrap();
    engine.insert(e, Position { x: 0.0, y: 0.0 }).unwrap();
    engine.insert(e, Velocity { dx: 1.0, dy: 1.0 }).unwrap();

    engine.insert(e, Frozen).unwrap();
    engine.remove::<Frozen>(e).unwrap();
    integrate(&mut engine);

    assert_eq!(engine.nodes::<MoveNode>().unwrap().len(), 1);
    assert_eq!(*engine.get::<Position>(e).unwrap().borrow(), Position { x: 1.0, y: 1.0 });
}
