//! Lightweight decaying effects: sparks, projectiles and ambient particles
//!
//! None of these collide with each other. Each `update` reports whether the
//! effect has expired; the caller removes it after the pass.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::context::{FrameContext, PlayerView};
use super::state::{ExpireReason, GameEvent};
use super::tilemap::TileQuery;
use crate::consts::*;
use crate::polar_to_cartesian;

/// A ballistic streak that slows to a stop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spark {
    pub pos: Vec2,
    /// Heading in radians
    pub angle: f32,
    pub speed: f32,
}

impl Spark {
    pub fn new(pos: Vec2, angle: f32, speed: f32) -> Self {
        Self { pos, angle, speed }
    }

    /// Move along the heading and decay. Returns true once speed hits zero.
    pub fn update(&mut self) -> bool {
        self.pos += polar_to_cartesian(self.speed, self.angle);
        self.speed = (self.speed - SPARK_DECAY).max(0.0);
        self.speed == 0.0
    }
}

/// Why a projectile left play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileEnd {
    HitWall,
    Aged,
    HitPlayer,
}

impl From<ProjectileEnd> for ExpireReason {
    fn from(end: ProjectileEnd) -> Self {
        match end {
            ProjectileEnd::HitWall => ExpireReason::HitWall,
            ProjectileEnd::Aged => ExpireReason::Aged,
            ProjectileEnd::HitPlayer => ExpireReason::HitPlayer,
        }
    }
}

/// Enemy gunfire travelling horizontally
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    /// Signed horizontal speed (pixels per tick)
    pub direction: f32,
    /// Ticks alive
    pub age: u32,
}

impl Projectile {
    pub fn new(pos: Vec2, direction: f32) -> Self {
        Self {
            pos,
            direction,
            age: 0,
        }
    }

    /// Advance one tick and resolve impacts
    ///
    /// A wall hit throws rebound sparks back the way the shot came. A player
    /// hit only counts while the player is outside the active dash window;
    /// the caller applies the death.
    pub fn update<T: TileQuery + ?Sized>(
        &mut self,
        tiles: &T,
        player: &PlayerView,
        ctx: &mut FrameContext<'_>,
    ) -> Option<ProjectileEnd> {
        self.pos.x += self.direction;
        self.age += 1;

        if tiles.solid_at(self.pos) {
            let base = if self.direction > 0.0 { PI } else { 0.0 };
            for _ in 0..MUZZLE_SPARKS {
                let angle = ctx.rng.random::<f32>() - 0.5 + base;
                let speed = 2.0 + ctx.rng.random::<f32>();
                ctx.spawns.sparks.push(Spark::new(self.pos, angle, speed));
            }
            return Some(ProjectileEnd::HitWall);
        }

        if self.age > PROJECTILE_MAX_AGE {
            return Some(ProjectileEnd::Aged);
        }

        if player.dashing.abs() < DASH_ACTIVE_END && player.rect.contains_point(self.pos) {
            ctx.spawns.request_shake(HIT_SCREEN_SHAKE);
            hit_burst(ctx, player.rect.center());
            ctx.spawns.events.push(GameEvent::PlayerHit {
                pos: player.rect.center(),
            });
            return Some(ProjectileEnd::HitPlayer);
        }

        None
    }
}

/// Visual kind of an ambient particle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Falling leaf that sways side to side
    Leaf,
    /// Dust puff from dashes and hits
    Dust,
}

impl ParticleKind {
    /// Number of animation frames
    pub fn frame_count(&self) -> u32 {
        match self {
            ParticleKind::Leaf => 18,
            ParticleKind::Dust => 4,
        }
    }

    /// Ticks each frame is shown
    pub fn frame_duration(&self) -> u32 {
        match self {
            ParticleKind::Leaf => 20,
            ParticleKind::Dust => 6,
        }
    }

    /// Last value the animation progress counter can reach
    pub fn last_tick(&self) -> u32 {
        self.frame_count() * self.frame_duration() - 1
    }
}

/// Decorative particle driven by a one-shot animation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub kind: ParticleKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Animation progress in ticks
    pub progress: u32,
    done: bool,
}

impl Particle {
    pub fn new(kind: ParticleKind, pos: Vec2, vel: Vec2, start_tick: u32) -> Self {
        Self {
            kind,
            pos,
            vel,
            progress: start_tick.min(kind.last_tick()),
            done: false,
        }
    }

    /// Current animation frame index
    pub fn frame(&self) -> u32 {
        self.progress / self.kind.frame_duration()
    }

    /// Drift and animate. Returns true on the tick after the animation ends.
    pub fn update(&mut self) -> bool {
        let expired = self.done;
        self.pos += self.vel;
        self.progress = (self.progress + 1).min(self.kind.last_tick());
        if self.progress >= self.kind.last_tick() {
            self.done = true;
        }
        expired
    }

    /// Lateral sway layered on top of the drift (leaves only)
    pub fn apply_sway(&mut self) {
        if self.kind == ParticleKind::Leaf {
            let (frequency, amplitude) = LEAF_SWAY;
            self.pos.x += (self.progress as f32 * frequency).sin() * amplitude;
        }
    }
}

/// Omnidirectional spark + dust burst used for every hit
pub fn hit_burst(ctx: &mut FrameContext<'_>, center: Vec2) {
    for _ in 0..HIT_BURST {
        let angle = ctx.rng.random::<f32>() * TAU;
        let speed = ctx.rng.random::<f32>() * 5.0;
        let spark_speed = 2.0 + ctx.rng.random::<f32>();
        ctx.spawns.sparks.push(Spark::new(center, angle, spark_speed));

        let vel = polar_to_cartesian(speed * 0.5, angle + PI);
        let start = ctx.rng.random_range(0..=7);
        ctx.spawns
            .particles
            .push(Particle::new(ParticleKind::Dust, center, vel, start));
    }
}
