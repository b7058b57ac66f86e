//! Enemy behaviour: patrol, ledge detection, shooting and contact combat
//!
//! The walking countdown doubles as the state flag. While it is zero the
//! enemy idles and may randomly start a walking bout; while it is positive
//! the enemy patrols, turning at walls and ledges. The tick a bout ends it
//! shoots at the player if the player is in front of it and close enough.

use std::f32::consts::PI;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::{Action, KineticBody};
use super::context::{FrameContext, PlayerView};
use super::effects::{Projectile, Spark, hit_burst};
use super::state::GameEvent;
use super::tilemap::TileQuery;
use crate::consts::*;

/// Result of an enemy update the tick has to act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyOutcome {
    /// Nothing for the caller to do
    Alive,
    /// Dashed through by the player; remove it
    Killed,
    /// Touched the player outside a dash; the player dies
    KilledPlayer,
}

/// A patrolling gunner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub body: KineticBody,
    /// Walking countdown (0 = idle)
    pub walking: u32,
}

impl Enemy {
    pub fn new(pos: Vec2) -> Self {
        Self {
            body: KineticBody::new(pos, ACTOR_SIZE),
            walking: 0,
        }
    }

    pub fn update<T: TileQuery + ?Sized>(
        &mut self,
        tiles: &T,
        player: &PlayerView,
        ctx: &mut FrameContext<'_>,
    ) -> EnemyOutcome {
        let mut movement = Vec2::ZERO;

        if self.walking > 0 {
            let (probe_x, probe_y) = LEDGE_PROBE;
            let probe = Vec2::new(
                self.body.rect().center_x() as f32 + self.body.facing_sign() * probe_x,
                self.body.pos.y + probe_y,
            );
            if tiles.solid_at(probe) {
                // Wall flags are from the previous tick
                if self.body.collisions.horizontal() {
                    self.body.flip = !self.body.flip;
                } else {
                    movement.x = self.body.facing_sign() * ENEMY_SPEED;
                }
            } else {
                self.body.flip = !self.body.flip;
            }

            self.walking = self.walking.saturating_sub(1);
            if self.walking == 0 {
                self.try_shoot(player, ctx);
            }
        } else if ctx.rng.random::<f32>() < ENEMY_WALK_CHANCE {
            let (min, max) = ENEMY_WALK_TICKS;
            self.walking = ctx.rng.random_range(min..=max);
        }

        self.body.advance(tiles, movement);

        if movement.x != 0.0 {
            self.body.set_action(Action::Run);
        } else {
            self.body.set_action(Action::Idle);
        }

        if !player.dead && self.body.rect().overlaps(&player.rect) {
            return self.contact(player, ctx);
        }

        EnemyOutcome::Alive
    }

    /// Fire at the player when they stand in front within range
    fn try_shoot(&self, player: &PlayerView, ctx: &mut FrameContext<'_>) {
        let dis = player.pos - self.body.pos;
        let (range_x, range_y) = ATTACK_RANGE;
        if dis.y.abs() >= range_y || dis.x.abs() >= range_x {
            return;
        }

        let (offset, base_angle) = match (self.body.flip, dis.x) {
            (true, dx) if dx < 0.0 => (-MUZZLE_OFFSET, PI),
            (false, dx) if dx > 0.0 => (MUZZLE_OFFSET, 0.0),
            _ => return,
        };

        let rect = self.body.rect();
        let muzzle = Vec2::new((rect.center_x() + offset) as f32, rect.center_y() as f32);
        let direction = self.body.facing_sign() * PROJECTILE_SPEED;
        ctx.spawns.projectiles.push(Projectile::new(muzzle, direction));
        for _ in 0..MUZZLE_SPARKS {
            let angle = ctx.rng.random::<f32>() - 0.5 + base_angle;
            let speed = 2.0 + ctx.rng.random::<f32>();
            ctx.spawns.sparks.push(Spark::new(muzzle, angle, speed));
        }
        ctx.spawns.events.push(GameEvent::ProjectileFired {
            pos: muzzle,
            direction,
        });
        log::debug!("Enemy fired at ({:.1}, {:.1})", muzzle.x, muzzle.y);
    }

    /// Resolve touching the player
    fn contact(&self, player: &PlayerView, ctx: &mut FrameContext<'_>) -> EnemyOutcome {
        let center = self.body.center();
        ctx.spawns.request_shake(HIT_SCREEN_SHAKE);
        ctx.spawns.events.push(GameEvent::EnemyHit { pos: center });
        hit_burst(ctx, center);

        if player.dashing.abs() >= DASH_ACTIVE_END {
            for angle in [0.0, PI] {
                let speed = 3.5 + ctx.rng.random::<f32>();
                ctx.spawns.sparks.push(Spark::new(center, angle, speed));
            }
            EnemyOutcome::Killed
        } else {
            ctx.spawns.events.push(GameEvent::PlayerHit {
                pos: player.rect.center(),
            });
            EnemyOutcome::KilledPlayer
        }
    }
}
