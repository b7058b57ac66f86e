//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (container order)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod context;
pub mod effects;
pub mod enemy;
pub mod player;
pub mod rect;
pub mod state;
pub mod tick;
pub mod tilemap;

pub use body::{Action, KineticBody};
pub use collision::{Axis, Collisions, resolve_axis};
pub use context::{FrameContext, PlayerView, SpawnQueue};
pub use effects::{Particle, ParticleKind, Projectile, ProjectileEnd, Spark, hit_burst};
pub use enemy::{Enemy, EnemyOutcome};
pub use player::Player;
pub use rect::Rect;
pub use state::{BodySnapshot, ExpireReason, GameEvent, GameState, LevelSpawns};
pub use tick::{TickInput, tick};
pub use tilemap::{TileGrid, TileQuery};
