//! Kinetic body shared by every physical actor
//!
//! Holds position, velocity and size plus the per-frame collision record,
//! and integrates one tick of motion with axis-separated collision
//! resolution followed by gravity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Axis, Collisions, resolve_axis};
use super::rect::Rect;
use super::tilemap::TileQuery;
use crate::consts::{GRAVITY, TERMINAL_VELOCITY};

/// Action label exposed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Action {
    #[default]
    Idle,
    Run,
    Jump,
    WallSlide,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Idle => "idle",
            Action::Run => "run",
            Action::Jump => "jump",
            Action::WallSlide => "wall_slide",
        }
    }
}

/// Physical state of a moving actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KineticBody {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: (i32, i32),
    /// Collision record of the last advance
    pub collisions: Collisions,
    pub action: Action,
    /// Ticks since `action` last changed
    pub action_ticks: u32,
    /// Facing left when true
    pub flip: bool,
    /// Movement input of the last advance
    pub last_movement: Vec2,
}

impl KineticBody {
    pub fn new(pos: Vec2, size: (i32, i32)) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            collisions: Collisions::default(),
            action: Action::Idle,
            action_ticks: 0,
            flip: false,
            last_movement: Vec2::ZERO,
        }
    }

    /// Integer hitbox at the current position
    pub fn rect(&self) -> Rect {
        Rect::at(self.pos, self.size)
    }

    /// Hitbox centre
    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    /// Switch action, restarting the action timer only on change
    pub fn set_action(&mut self, action: Action) {
        if action != self.action {
            self.action = action;
            self.action_ticks = 0;
        }
    }

    /// Facing direction as a sign (+1 right, -1 left)
    pub fn facing_sign(&self) -> f32 {
        if self.flip { -1.0 } else { 1.0 }
    }

    /// Advance one tick with the given movement input
    pub fn advance<T: TileQuery + ?Sized>(&mut self, tiles: &T, movement: Vec2) -> Collisions {
        let mut collisions = Collisions::default();
        let frame_delta = movement + self.vel;

        self.pos.x += frame_delta.x;
        self.pos.x = resolve_axis(tiles, self.pos, self.size, frame_delta.x, Axis::X, &mut collisions);

        self.pos.y += frame_delta.y;
        self.pos.y = resolve_axis(tiles, self.pos, self.size, frame_delta.y, Axis::Y, &mut collisions);

        if movement.x > 0.0 {
            self.flip = false;
        }
        if movement.x < 0.0 {
            self.flip = true;
        }
        self.last_movement = movement;

        self.vel.y = (self.vel.y + GRAVITY).min(TERMINAL_VELOCITY);
        if collisions.vertical() {
            self.vel.y = 0.0;
        }

        self.collisions = collisions;
        self.action_ticks += 1;
        collisions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tilemap::TileGrid;
    use proptest::prelude::*;

    fn floor_grid() -> TileGrid {
        let mut grid = TileGrid::default();
        grid.fill_row(5, -10, 20);
        grid
    }

    #[test]
    fn test_falls_and_lands_on_floor() {
        let grid = floor_grid();
        let mut body = KineticBody::new(Vec2::new(40.0, 40.0), (8, 15));

        let mut landed = false;
        for _ in 0..200 {
            let c = body.advance(&grid, Vec2::ZERO);
            if c.down {
                landed = true;
                break;
            }
        }
        assert!(landed);
        // Floor top is at y = 80
        assert_eq!(body.pos.y, 65.0);
        assert_eq!(body.vel.y, 0.0);
    }

    #[test]
    fn test_facing_follows_input_sign() {
        let grid = TileGrid::default();
        let mut body = KineticBody::new(Vec2::ZERO, (8, 15));

        body.advance(&grid, Vec2::new(-1.0, 0.0));
        assert!(body.flip);
        body.advance(&grid, Vec2::ZERO);
        assert!(body.flip, "zero input keeps facing");
        body.advance(&grid, Vec2::new(0.5, 0.0));
        assert!(!body.flip);
        assert_eq!(body.last_movement, Vec2::new(0.5, 0.0));
    }

    #[test]
    fn test_collision_record_is_not_merged() {
        let grid = floor_grid();
        let mut body = KineticBody::new(Vec2::new(40.0, 65.0), (8, 15));
        body.vel.y = 1.0;
        assert!(body.advance(&grid, Vec2::ZERO).down);

        // Lift the body clear of the floor; the next record starts fresh
        body.pos.y = 0.0;
        let c = body.advance(&grid, Vec2::ZERO);
        assert!(!c.down);
        assert_eq!(body.collisions, c);
    }

    #[test]
    fn test_action_timer_restarts_on_change() {
        let grid = TileGrid::default();
        let mut body = KineticBody::new(Vec2::ZERO, (8, 15));
        body.advance(&grid, Vec2::ZERO);
        body.advance(&grid, Vec2::ZERO);
        assert_eq!(body.action_ticks, 2);

        body.set_action(Action::Idle);
        assert_eq!(body.action_ticks, 2);
        body.set_action(Action::Run);
        assert_eq!(body.action_ticks, 0);
        assert_eq!(body.action.as_str(), "run");
    }

    proptest! {
        #[test]
        fn prop_velocity_bounded_and_flags_consistent(
            x in -100.0f32..300.0,
            y in -100.0f32..70.0,
            vx in -6.0f32..6.0,
            vy in -5.0f32..5.0,
            mx in -1.0f32..1.0,
            ticks in 1usize..40,
        ) {
            let mut grid = floor_grid();
            grid.fill_column(-3, 0, 5);
            grid.fill_column(12, 0, 5);
            let mut body = KineticBody::new(Vec2::new(x, y), (8, 15));
            body.vel = Vec2::new(vx, vy);

            for _ in 0..ticks {
                let c = body.advance(&grid, Vec2::new(mx, 0.0));
                prop_assert!(!(c.up && c.down));
                prop_assert!(!(c.left && c.right));
                prop_assert!(body.vel.y <= TERMINAL_VELOCITY);
                if c.vertical() {
                    prop_assert_eq!(body.vel.y, 0.0);
                }
            }
        }
    }
}
