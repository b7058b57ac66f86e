//! Game state and core simulation types
//!
//! `GameState` owns the player, every entity container and the seeded RNG.
//! Only `tick` and `load_level` mutate it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{Action, KineticBody};
use super::collision::Collisions;
use super::effects::{Particle, Projectile, Spark};
use super::enemy::Enemy;
use super::player::Player;
use super::rect::Rect;
use crate::consts::*;

/// Why a projectile was removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpireReason {
    HitWall,
    Aged,
    HitPlayer,
}

/// Signals for the presentation/audio layer, collected per tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player jump went through (play jump sound)
    JumpSucceeded { pos: Vec2 },
    /// Dash started; `direction` is +1 or -1
    DashStarted { pos: Vec2, direction: i32 },
    /// Enemy fired from its muzzle
    ProjectileFired { pos: Vec2, direction: f32 },
    /// Projectile left play
    ProjectileExpired { pos: Vec2, reason: ExpireReason },
    /// Enemy touched the player (dash or not)
    EnemyHit { pos: Vec2 },
    /// Enemy was dashed through and removed
    EnemyKilled { pos: Vec2 },
    /// Player died
    PlayerHit { pos: Vec2 },
    /// Screen shake raised to at least `magnitude`
    ScreenShake { magnitude: f32 },
    /// All enemies gone and the transition finished; load the next level
    LevelCleared,
    /// Death timer ran out; reload the current level
    RestartLevel,
}

/// Spawn points for a level, extracted by the level loader
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelSpawns {
    pub player: Vec2,
    pub enemies: Vec<Vec2>,
    /// Top-left corners of large tree decorations (leaf emitters)
    pub trees: Vec<Vec2>,
}

/// Read-only per-frame view of an actor for drawing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodySnapshot {
    pub pos: Vec2,
    /// Facing left
    pub flip: bool,
    pub action: Action,
    pub action_ticks: u32,
    pub collisions: Collisions,
    /// Dash counter magnitude (0 for enemies)
    pub dash: u32,
    /// False while the sprite should be hidden
    pub visible: bool,
}

impl BodySnapshot {
    pub fn of(body: &KineticBody) -> Self {
        Self {
            pos: body.pos,
            flip: body.flip,
            action: body.action,
            action_ticks: body.action_ticks,
            collisions: body.collisions,
            dash: 0,
            visible: true,
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub sparks: Vec<Spark>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub leaf_emitters: Vec<Rect>,
    /// Death timer (0 = alive, counts up after death)
    pub dead: u32,
    pub screen_shake: f32,
    /// Fade counter: negative while fading in, counts up to advance level
    pub transition: i32,
    /// Events produced by the last tick
    pub events: Vec<GameEvent>,
    pub(crate) level_cleared: bool,
    pub(crate) restart_requested: bool,
}

impl GameState {
    /// Create an empty state with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            player: Player::new(Vec2::ZERO),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            sparks: Vec::new(),
            particles: Vec::new(),
            leaf_emitters: Vec::new(),
            dead: 0,
            screen_shake: 0.0,
            transition: 0,
            events: Vec::new(),
            level_cleared: false,
            restart_requested: false,
        }
    }

    /// Replace all level-scoped state with freshly spawned actors
    ///
    /// In-flight effects are discarded. Screen shake carries over.
    pub fn load_level(&mut self, spawns: &LevelSpawns) {
        self.player = Player::new(spawns.player);
        self.enemies = spawns.enemies.iter().map(|&pos| Enemy::new(pos)).collect();

        let (dx, dy, w, h) = LEAF_EMITTER;
        self.leaf_emitters = spawns
            .trees
            .iter()
            .map(|tree| Rect::new(tree.x as i32 + dx, tree.y as i32 + dy, w, h))
            .collect();

        self.projectiles.clear();
        self.sparks.clear();
        self.particles.clear();
        self.events.clear();

        self.dead = 0;
        self.transition = -TRANSITION_TICKS;
        self.level_cleared = false;
        self.restart_requested = false;

        log::info!(
            "Level loaded: {} enemies, {} leaf emitters",
            self.enemies.len(),
            self.leaf_emitters.len()
        );
    }

    pub fn is_player_dead(&self) -> bool {
        self.dead > 0
    }

    pub fn player_snapshot(&self) -> BodySnapshot {
        BodySnapshot {
            dash: self.player.dashing.unsigned_abs(),
            visible: self.player.is_visible(),
            ..BodySnapshot::of(&self.player.body)
        }
    }

    pub fn enemy_snapshots(&self) -> Vec<BodySnapshot> {
        self.enemies.iter().map(|e| BodySnapshot::of(&e.body)).collect()
    }
}
