//! Ninja Sim - per-frame simulation core of a 2D action platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, tile collisions, actors, effects)
//! - `settings`: Presentation preferences that gate effect output

pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
///
/// Values are per-tick at the fixed logical rate and are tuned by feel.
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const SIM_HZ: u32 = 60;

    /// Tile grid cell size in pixels
    pub const TILE_SIZE: i32 = 16;

    /// Player and enemy hitbox size (pixels)
    pub const ACTOR_SIZE: (i32, i32) = (8, 15);

    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.1;
    /// Maximum downward velocity
    pub const TERMINAL_VELOCITY: f32 = 5.0;

    /// Airborne ticks before the player counts as jumping / wall sliding
    pub const AIR_TIME_GRACE: u32 = 4;
    /// Airborne counter value set by a successful jump
    pub const JUMP_AIR_TIME: u32 = 5;
    /// Vertical velocity imparted by any jump
    pub const JUMP_VELOCITY: f32 = -3.0;
    /// Horizontal push away from the wall on a wall jump
    pub const WALL_JUMP_PUSH: f32 = 2.5;
    /// Maximum fall speed while wall sliding
    pub const WALL_SLIDE_MAX_FALL: f32 = 0.5;
    /// Horizontal velocity decay per tick
    pub const FRICTION: f32 = 0.1;

    /// Dash counter value on activation (sign = direction)
    pub const DASH_DURATION: i32 = 60;
    /// Dash counter magnitude at which the active window ends
    pub const DASH_ACTIVE_END: i32 = 50;
    /// Horizontal speed during the active window
    pub const DASH_SPEED: f32 = 6.0;
    /// Speed multiplier on the last active tick
    pub const DASH_TAIL_DAMPING: f32 = 0.1;
    /// Particles in the burst at dash start and end
    pub const DASH_BURST_PARTICLES: usize = 20;

    /// Per-tick chance that an idle enemy starts walking
    pub const ENEMY_WALK_CHANCE: f32 = 0.01;
    /// Walking bout length range (ticks, inclusive)
    pub const ENEMY_WALK_TICKS: (u32, u32) = (30, 120);
    /// Enemy walking speed
    pub const ENEMY_SPEED: f32 = 0.5;
    /// Ledge probe offset: horizontal (in facing direction), vertical (from top)
    pub const LEDGE_PROBE: (f32, f32) = (7.0, 23.0);
    /// Attack window: max horizontal and vertical distance to the player
    pub const ATTACK_RANGE: (f32, f32) = (180.0, 16.0);
    /// Gun muzzle horizontal offset from the enemy centre
    pub const MUZZLE_OFFSET: i32 = 7;
    /// Muzzle flash sparks per shot
    pub const MUZZLE_SPARKS: usize = 4;

    /// Projectile speed (pixels per tick)
    pub const PROJECTILE_SPEED: f32 = 1.5;
    /// Ticks before a projectile expires on its own
    pub const PROJECTILE_MAX_AGE: u32 = 360;

    /// Spark speed decay per tick
    pub const SPARK_DECAY: f32 = 0.1;

    /// Minimum screen shake on a hit
    pub const HIT_SCREEN_SHAKE: f32 = 16.0;
    /// Sparks and particles in a hit burst
    pub const HIT_BURST: usize = 30;

    /// Leaf spawn roll: spawn when `rand * divisor < emitter area`
    pub const LEAF_SPAWN_DIVISOR: f32 = 49999.0;
    /// Leaf drift velocity
    pub const LEAF_VELOCITY: (f32, f32) = (-0.1, 0.3);
    /// Leaf sway frequency (per animation tick) and amplitude
    pub const LEAF_SWAY: (f32, f32) = (0.035, 0.3);
    /// Leaf emitter rect relative to a tree decoration: (dx, dy, w, h)
    pub const LEAF_EMITTER: (i32, i32, i32, i32) = (4, 4, 23, 13);

    /// Player centre distance from y = 0 that counts as falling off the map
    pub const FALL_DEATH_Y: f32 = 600.0;
    /// Death timer value at which the fade-out starts
    pub const DEATH_FADE_TICKS: u32 = 10;
    /// Death timer value after which the level restarts
    pub const DEATH_RESTART_TICKS: u32 = 40;
    /// Transition counter bound (fade in from -30, advance level above 30)
    pub const TRANSITION_TICKS: i32 = 30;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Move `value` toward zero by `step`, never crossing zero
#[inline]
pub fn approach_zero(value: f32, step: f32) -> f32 {
    if value > 0.0 {
        (value - step).max(0.0)
    } else {
        (value + step).min(0.0)
    }
}
