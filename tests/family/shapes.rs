//! Components and node shapes shared by the family tests.

use ash_family::{NodeShape, Slot, SlotDeclarations};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Velocity {
    pub dx: f32,
    pub dy: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Health(pub i32);

#[derive(Default, Debug)]
pub struct MoveNode {
    pub position: Slot<Position>,
    pub velocity: Slot<Velocity>,
}

impl NodeShape for MoveNode {
    fn declare(slots: &mut SlotDeclarations<'_, Self>) {
        slots
            .slot(|node| &mut node.position)
            .slot(|node| &mut node.velocity);
    }
}

#[derive(Default, Debug)]
pub struct HealthNode {
    pub health: Slot<Health>,
}

impl NodeShape for HealthNode {
    fn declare(slots: &mut SlotDeclarations<'_, Self>) {
        slots.slot(|node| &mut node.health);
    }
}

pub fn position(x: f32, y: f32) -> Position {
    Position { x, y }
}

pub fn velocity(dx: f32, dy: f32) -> Velocity {
    Velocity { dx, dy }
}
