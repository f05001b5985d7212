//! Entities on the playfield: the player, the NPCs and the decorative flowers.

use glam::Vec2;

use crate::geometry::Playfield;

/// Head radius shared by the player and every NPC.
pub const BODY_RADIUS: f32 = 30.0;
/// Distance covered by one discrete move command.
pub const MOVE_STEP: f32 = 15.0;
/// Player and NPC must be closer than this for a conversation to start.
pub const TALK_DISTANCE: f32 = 50.0;
/// Autonomous walking speed in the follow scene, playfield units per second
/// (3 units per frame at 60 Hz).
pub const FOLLOW_SPEED: f32 = 180.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Unit vector in playfield space (y grows downward).
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
        }
    }
}

/// The player-controlled character.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Self { pos: Vec2::new(x, y), radius: BODY_RADIUS }
    }

    /// One discrete step in `dir`, then clamp inside the walls.
    pub fn step(self, dir: Direction, field: &Playfield) -> Self {
        let pos = field.clamp_body(self.pos + dir.unit() * MOVE_STEP, self.radius);
        Self { pos, ..self }
    }

    /// Autonomous rightward walk used by the follow scene; y is pinned to
    /// the vertical centre of the playfield.
    pub fn walk_right(self, dt: f32, field: &Playfield) -> Self {
        let pos = Vec2::new(self.pos.x + FOLLOW_SPEED * dt, field.center().y);
        Self { pos, ..self }
    }
}

/// A stationary character the player has to find.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Npc {
    pub pos: Vec2,
    pub radius: f32,
}

impl Npc {
    pub fn new(x: f32, y: f32) -> Self {
        Self { pos: Vec2::new(x, y), radius: BODY_RADIUS }
    }
}

/// Background decoration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Flower {
    pub pos: Vec2,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_moves_by_fixed_amount() {
        let p = Player::new(400.0, 300.0).step(Direction::Left, &Playfield::BASE);
        assert_eq!(p.pos, Vec2::new(385.0, 300.0));
        let p = p.step(Direction::Down, &Playfield::BASE);
        assert_eq!(p.pos, Vec2::new(385.0, 315.0));
    }

    #[test]
    fn step_clamps_at_wall() {
        let p = Player::new(75.0, 300.0).step(Direction::Left, &Playfield::BASE);
        assert_eq!(p.pos.x, 70.0);
    }

    #[test]
    fn walk_right_pins_y_to_center() {
        let p = Player::new(100.0, 123.0).walk_right(1.0 / 60.0, &Playfield::BASE);
        assert!((p.pos.x - 103.0).abs() < 1e-4);
        assert_eq!(p.pos.y, 300.0);
    }
}
