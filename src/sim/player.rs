//! Player behaviour: locomotion, jumping, wall sliding and dashing
//!
//! Locomotion states are picked in strict priority order every tick
//! (wall slide, then air, then run, then idle). The dash runs alongside
//! them as a signed countdown: its sign is the direction, magnitudes
//! 51..=60 are the active window and 1..=50 the cooldown.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::{Action, KineticBody};
use super::context::FrameContext;
use super::effects::{Particle, ParticleKind};
use super::tilemap::TileQuery;
use crate::consts::*;
use crate::{approach_zero, polar_to_cartesian};

/// The player-controlled ninja
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: KineticBody,
    /// Ticks since last standing on ground
    pub air_time: u32,
    /// Remaining jump charges (0 or 1)
    pub jumps: u32,
    pub wall_slide: bool,
    /// Signed dash countdown in -60..=60
    pub dashing: i32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            body: KineticBody::new(pos, ACTOR_SIZE),
            air_time: 0,
            jumps: 1,
            wall_slide: false,
            dashing: 0,
        }
    }

    /// Inside the active dash window
    pub fn is_dashing(&self) -> bool {
        self.dashing.abs() > DASH_ACTIVE_END
    }

    /// Sprite is hidden during the active dash window
    pub fn is_visible(&self) -> bool {
        !self.is_dashing()
    }

    /// Advance one tick with horizontal input in `movement.x`
    pub fn update<T: TileQuery + ?Sized>(
        &mut self,
        tiles: &T,
        movement: Vec2,
        ctx: &mut FrameContext<'_>,
    ) {
        let collisions = self.body.advance(tiles, movement);

        self.air_time += 1;
        if collisions.down {
            self.air_time = 0;
            self.jumps = 1;
        }

        self.wall_slide = false;
        if collisions.horizontal() && self.air_time > AIR_TIME_GRACE {
            self.wall_slide = true;
            self.body.vel.y = self.body.vel.y.min(WALL_SLIDE_MAX_FALL);
            self.body.flip = !collisions.right;
            self.body.set_action(Action::WallSlide);
        }

        if !self.wall_slide {
            if self.air_time > AIR_TIME_GRACE {
                self.body.set_action(Action::Jump);
                self.jumps = 0;
            } else if movement.x != 0.0 {
                self.body.set_action(Action::Run);
            } else {
                self.body.set_action(Action::Idle);
            }
        }

        // Burst on the activation tick and on the tick the active window closes
        let magnitude = self.dashing.abs();
        if magnitude == DASH_DURATION || magnitude == DASH_ACTIVE_END {
            self.dash_burst(ctx);
        }

        if self.dashing > 0 {
            self.dashing = (self.dashing - 1).max(0);
        }
        if self.dashing < 0 {
            self.dashing = (self.dashing + 1).min(0);
        }

        if self.is_dashing() {
            let direction = self.dashing.signum() as f32;
            self.body.vel.x = direction * DASH_SPEED;
            if self.dashing.abs() == DASH_ACTIVE_END + 1 {
                self.body.vel.x *= DASH_TAIL_DAMPING;
            }
            let trail = Vec2::new(direction * ctx.rng.random::<f32>() * 3.0, 0.0);
            let start = ctx.rng.random_range(0..=7);
            ctx.spawns.particles.push(Particle::new(
                ParticleKind::Dust,
                self.body.center(),
                trail,
                start,
            ));
        }

        self.body.vel.x = approach_zero(self.body.vel.x, FRICTION);
    }

    fn dash_burst(&self, ctx: &mut FrameContext<'_>) {
        let center = self.body.center();
        for _ in 0..DASH_BURST_PARTICLES {
            let angle = ctx.rng.random::<f32>() * TAU;
            let speed = ctx.rng.random::<f32>() * 0.5 + 0.5;
            let start = ctx.rng.random_range(0..=7);
            ctx.spawns.particles.push(Particle::new(
                ParticleKind::Dust,
                center,
                polar_to_cartesian(speed, angle),
                start,
            ));
        }
    }

    /// Try to jump. Returns true if the jump happened.
    ///
    /// While wall sliding the last input must still push into the wall;
    /// the kick sends the player away from it.
    pub fn jump(&mut self) -> bool {
        if self.wall_slide {
            let last_x = self.body.last_movement.x;
            let push = if self.body.flip && last_x < 0.0 {
                WALL_JUMP_PUSH
            } else if !self.body.flip && last_x > 0.0 {
                -WALL_JUMP_PUSH
            } else {
                return false;
            };
            self.body.vel = Vec2::new(push, JUMP_VELOCITY);
            self.air_time = JUMP_AIR_TIME;
            self.jumps = self.jumps.saturating_sub(1);
            return true;
        }

        if self.jumps > 0 {
            self.body.vel.y = JUMP_VELOCITY;
            self.jumps -= 1;
            self.air_time = JUMP_AIR_TIME;
            return true;
        }

        false
    }

    /// Start a dash in the facing direction. No-op until the previous dash
    /// has fully cooled down.
    pub fn dash(&mut self) -> bool {
        if self.dashing != 0 {
            return false;
        }
        self.dashing = if self.body.flip {
            -DASH_DURATION
        } else {
            DASH_DURATION
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::context::SpawnQueue;
    use crate::sim::tilemap::TileGrid;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn floor_grid() -> TileGrid {
        let mut grid = TileGrid::default();
        grid.fill_row(5, -10, 40);
        grid
    }

    /// Player standing on the floor at y = 80
    fn grounded(grid: &TileGrid, rng: &mut Pcg32) -> Player {
        let mut player = Player::new(Vec2::new(40.0, 65.0));
        player.body.vel.y = 1.0;
        let mut spawns = SpawnQueue::default();
        let mut ctx = FrameContext::new(rng, &mut spawns);
        player.update(grid, Vec2::ZERO, &mut ctx);
        assert!(player.body.collisions.down);
        player
    }

    #[test]
    fn test_jump_consumes_charge() {
        let mut player = Player::new(Vec2::ZERO);
        assert!(player.jump());
        assert_eq!(player.body.vel.y, JUMP_VELOCITY);
        assert_eq!(player.jumps, 0);
        assert_eq!(player.air_time, JUMP_AIR_TIME);

        let vel = player.body.vel;
        assert!(!player.jump());
        assert_eq!(player.body.vel, vel);
    }

    #[test]
    fn test_landing_restores_jump() {
        let grid = floor_grid();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut player = grounded(&grid, &mut rng);
        assert!(player.jump());

        let mut spawns = SpawnQueue::default();
        let mut ctx = FrameContext::new(&mut rng, &mut spawns);
        let mut landed_after = None;
        for tick in 0..200 {
            player.update(&grid, Vec2::ZERO, &mut ctx);
            if player.body.collisions.down {
                landed_after = Some(tick);
                break;
            }
            assert_eq!(player.body.action, Action::Jump);
            assert_eq!(player.jumps, 0);
        }
        assert!(landed_after.is_some());
        assert_eq!(player.jumps, 1);
        assert_eq!(player.air_time, 0);
        assert_eq!(player.body.action, Action::Idle);
    }

    #[test]
    fn test_run_and_idle_actions() {
        let grid = floor_grid();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut player = grounded(&grid, &mut rng);
        let mut spawns = SpawnQueue::default();
        let mut ctx = FrameContext::new(&mut rng, &mut spawns);

        player.update(&grid, Vec2::new(-1.0, 0.0), &mut ctx);
        assert_eq!(player.body.action, Action::Run);
        assert!(player.body.flip);
        player.update(&grid, Vec2::ZERO, &mut ctx);
        assert_eq!(player.body.action, Action::Idle);
    }

    #[test]
    fn test_dash_is_idempotent_while_active() {
        let mut player = Player::new(Vec2::ZERO);
        assert!(player.dash());
        assert_eq!(player.dashing, DASH_DURATION);
        assert!(!player.dash());
        assert_eq!(player.dashing, DASH_DURATION);

        let mut left = Player::new(Vec2::ZERO);
        left.body.flip = true;
        assert!(left.dash());
        assert_eq!(left.dashing, -DASH_DURATION);
    }

    #[test]
    fn test_dash_cycle_decays_in_sixty_ticks() {
        let grid = floor_grid();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut player = grounded(&grid, &mut rng);
        assert!(player.dash());

        let mut burst_ticks = Vec::new();
        let mut trail_ticks = 0;
        for tick in 1..=60 {
            let before = player.dashing;
            let mut spawns = SpawnQueue::default();
            let mut ctx = FrameContext::new(&mut rng, &mut spawns);
            player.update(&grid, Vec2::ZERO, &mut ctx);
            assert_eq!(player.dashing, before - 1);

            match spawns.particles.len() {
                0 => {}
                1 => trail_ticks += 1,
                20 | 21 => burst_ticks.push(tick),
                n => panic!("unexpected {n} particles on tick {tick}"),
            }
            assert_eq!(player.is_visible(), player.dashing <= DASH_ACTIVE_END);
        }

        assert_eq!(player.dashing, 0);
        // Edges fire when the counter read 60 and 50 at the start of the tick
        assert_eq!(burst_ticks, vec![1, 11]);
        // Trail-only ticks: the counter landed on 58..=51
        assert_eq!(trail_ticks, 8);
        assert!(player.dash(), "cooldown fully elapsed");
    }

    #[test]
    fn test_dash_velocity_and_tail_damping() {
        let grid = floor_grid();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut player = grounded(&grid, &mut rng);
        player.dash();

        let mut spawns = SpawnQueue::default();
        let mut ctx = FrameContext::new(&mut rng, &mut spawns);
        player.update(&grid, Vec2::ZERO, &mut ctx);
        assert!((player.body.vel.x - (DASH_SPEED - FRICTION)).abs() < 1e-6);

        // Run until the counter lands on 51
        while player.dashing != DASH_ACTIVE_END + 1 {
            player.update(&grid, Vec2::ZERO, &mut ctx);
        }
        let tail = DASH_SPEED * DASH_TAIL_DAMPING - FRICTION;
        assert!((player.body.vel.x - tail).abs() < 1e-6);
    }

    #[test]
    fn test_friction_decays_toward_zero() {
        let grid = floor_grid();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut player = grounded(&grid, &mut rng);
        player.body.vel.x = -0.25;

        let mut spawns = SpawnQueue::default();
        let mut ctx = FrameContext::new(&mut rng, &mut spawns);
        player.update(&grid, Vec2::ZERO, &mut ctx);
        assert!((player.body.vel.x + 0.15).abs() < 1e-6);
        player.update(&grid, Vec2::ZERO, &mut ctx);
        player.update(&grid, Vec2::ZERO, &mut ctx);
        assert_eq!(player.body.vel.x, 0.0);
    }

    #[test]
    fn test_wall_slide_and_wall_jump() {
        let mut grid = TileGrid::default();
        grid.fill_column(4, 0, 5);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut spawns = SpawnQueue::default();
        let mut ctx = FrameContext::new(&mut rng, &mut spawns);

        let mut player = Player::new(Vec2::new(55.0, 20.0));
        player.air_time = 10;
        player.jumps = 0;
        for _ in 0..3 {
            player.update(&grid, Vec2::new(1.0, 0.0), &mut ctx);
        }
        assert!(player.wall_slide);
        assert!(player.body.collisions.right);
        assert!(!player.body.flip, "faces the wall on the right");
        assert_eq!(player.body.action, Action::WallSlide);
        assert!(player.body.vel.y <= WALL_SLIDE_MAX_FALL);

        assert!(player.jump());
        assert_eq!(player.body.vel, Vec2::new(-WALL_JUMP_PUSH, JUMP_VELOCITY));
        assert_eq!(player.air_time, JUMP_AIR_TIME);
        assert_eq!(player.jumps, 0);
    }

    #[test]
    fn test_wall_slide_on_left_wall() {
        let mut grid = TileGrid::default();
        grid.fill_column(2, 0, 5);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut spawns = SpawnQueue::default();
        let mut ctx = FrameContext::new(&mut rng, &mut spawns);

        // Wall spans x 32..48
        let mut player = Player::new(Vec2::new(49.0, 20.0));
        player.air_time = 10;
        player.jumps = 0;
        for _ in 0..3 {
            player.update(&grid, Vec2::new(-1.0, 0.0), &mut ctx);
        }
        assert!(player.wall_slide);
        assert!(player.body.collisions.left);
        assert!(!player.body.collisions.right);
        assert_eq!(player.body.pos.x, 48.0);
        assert!(player.body.flip, "faces the wall on the left");
        assert_eq!(player.body.action, Action::WallSlide);

        assert!(player.jump());
        assert_eq!(player.body.vel, Vec2::new(WALL_JUMP_PUSH, JUMP_VELOCITY));
    }

    #[test]
    fn test_wall_jump_needs_input_into_wall() {
        let mut player = Player::new(Vec2::ZERO);
        player.wall_slide = true;
        player.body.flip = true;
        player.body.last_movement = Vec2::new(1.0, 0.0);
        assert!(!player.jump());

        player.body.last_movement = Vec2::new(-1.0, 0.0);
        assert!(player.jump());
        assert_eq!(player.body.vel.x, WALL_JUMP_PUSH);
    }
}
