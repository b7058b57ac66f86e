//! Per-phase context passed into behaviour updates
//!
//! Actors never hold references back into the game state. Anything they
//! need to read comes in through `PlayerView`; anything they create (effects,
//! events, screen-shake requests) goes into a `SpawnQueue` that the tick
//! applies once the pass over the container is finished.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::effects::{Particle, Projectile, Spark};
use super::player::Player;
use super::rect::Rect;
use super::state::GameEvent;

/// Read-only view of the player used by enemies and projectiles
#[derive(Debug, Clone, Copy)]
pub struct PlayerView {
    pub rect: Rect,
    pub pos: Vec2,
    pub dashing: i32,
    /// Death counter is running
    pub dead: bool,
}

impl PlayerView {
    pub fn new(player: &Player, dead: bool) -> Self {
        Self {
            rect: player.body.rect(),
            pos: player.body.pos,
            dashing: player.dashing,
            dead,
        }
    }
}

/// Entities and signals created during a pass
#[derive(Debug, Default)]
pub struct SpawnQueue {
    pub sparks: Vec<Spark>,
    pub particles: Vec<Particle>,
    pub projectiles: Vec<Projectile>,
    pub events: Vec<GameEvent>,
    /// Largest screen-shake magnitude requested
    pub screen_shake: f32,
}

impl SpawnQueue {
    pub fn request_shake(&mut self, magnitude: f32) {
        self.screen_shake = self.screen_shake.max(magnitude);
    }
}

/// Mutable context for one behaviour update
pub struct FrameContext<'a> {
    pub rng: &'a mut Pcg32,
    pub spawns: &'a mut SpawnQueue,
}

impl<'a> FrameContext<'a> {
    pub fn new(rng: &'a mut Pcg32, spawns: &'a mut SpawnQueue) -> Self {
        Self { rng, spawns }
    }
}
