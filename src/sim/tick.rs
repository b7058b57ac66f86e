//! Fixed timestep simulation tick
//!
//! Advances the game state by one frame. Actors are updated in a fixed
//! order (player, enemies, projectiles, sparks, particles) because later
//! phases read state the earlier ones produced this frame, such as the
//! player's dash counter. Whatever a phase spawns is appended once that
//! phase is done, so later phases of the same tick already see it.

use glam::Vec2;
use rand::Rng;

use super::context::{FrameContext, PlayerView, SpawnQueue};
use super::effects::{Particle, ParticleKind, ProjectileEnd};
use super::enemy::EnemyOutcome;
use super::state::{GameEvent, GameState};
use super::tilemap::TileQuery;
use crate::Settings;
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Horizontal input: right minus left, usually -1, 0 or 1
    pub movement: f32,
    /// Jump pressed this frame
    pub jump: bool,
    /// Dash pressed this frame
    pub dash: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick<T: TileQuery + ?Sized>(
    state: &mut GameState,
    tiles: &T,
    input: &TickInput,
    settings: &Settings,
) {
    state.events.clear();
    state.time_ticks += 1;
    state.screen_shake = (state.screen_shake - 1.0).max(0.0);

    update_transitions(state);

    let mut spawns = SpawnQueue::default();
    spawn_leaves(state, &mut spawns);
    absorb(state, spawns, settings);

    // Player
    let mut spawns = SpawnQueue::default();
    if input.jump && state.player.jump() {
        spawns.events.push(GameEvent::JumpSucceeded {
            pos: state.player.body.center(),
        });
    }
    if input.dash && state.player.dash() {
        spawns.events.push(GameEvent::DashStarted {
            pos: state.player.body.center(),
            direction: state.player.dashing.signum(),
        });
    }
    if !state.is_player_dead() {
        let mut ctx = FrameContext::new(&mut state.rng, &mut spawns);
        state
            .player
            .update(tiles, Vec2::new(input.movement, 0.0), &mut ctx);
    }
    absorb(state, spawns, settings);

    // Enemies
    let mut spawns = SpawnQueue::default();
    let mut killed = Vec::new();
    for (index, enemy) in state.enemies.iter_mut().enumerate() {
        // Rebuilt per enemy so a death earlier in the pass is visible
        let view = PlayerView::new(&state.player, state.dead > 0);
        let mut ctx = FrameContext::new(&mut state.rng, &mut spawns);
        match enemy.update(tiles, &view, &mut ctx) {
            EnemyOutcome::Alive => {}
            EnemyOutcome::Killed => {
                let pos = enemy.body.center();
                log::debug!("Enemy killed at ({:.0}, {:.0})", pos.x, pos.y);
                spawns.events.push(GameEvent::EnemyKilled { pos });
                killed.push(index);
            }
            EnemyOutcome::KilledPlayer => {
                log::debug!("Player killed by enemy contact");
                state.dead += 1;
            }
        }
    }
    for index in killed.into_iter().rev() {
        state.enemies.remove(index);
    }
    absorb(state, spawns, settings);

    // Projectiles
    let mut spawns = SpawnQueue::default();
    let view = PlayerView::new(&state.player, state.dead > 0);
    let mut player_hits = 0;
    {
        let mut ctx = FrameContext::new(&mut state.rng, &mut spawns);
        state.projectiles.retain_mut(|projectile| {
            let Some(end) = projectile.update(tiles, &view, &mut ctx) else {
                return true;
            };
            if end == ProjectileEnd::HitPlayer {
                player_hits += 1;
            }
            ctx.spawns.events.push(GameEvent::ProjectileExpired {
                pos: projectile.pos,
                reason: end.into(),
            });
            false
        });
    }
    if player_hits > 0 {
        log::debug!("Player killed by projectile");
        state.dead += player_hits;
    }
    absorb(state, spawns, settings);

    // Sparks
    state.sparks.retain_mut(|spark| !spark.update());

    // Ambient particles
    state.particles.retain_mut(|particle| {
        let expired = particle.update();
        particle.apply_sway();
        !expired
    });
}

/// Level-clear fade, fade-in, death timer and fall-off-map check
fn update_transitions(state: &mut GameState) {
    if state.enemies.is_empty() && !state.level_cleared {
        state.transition += 1;
        if state.transition > TRANSITION_TICKS {
            state.level_cleared = true;
            state.events.push(GameEvent::LevelCleared);
            log::info!("Level cleared after {} ticks", state.time_ticks);
        }
    }
    if state.transition < 0 {
        state.transition += 1;
    }

    if state.dead > 0 {
        state.dead += 1;
        if state.dead >= DEATH_FADE_TICKS {
            state.transition = (state.transition + 1).min(TRANSITION_TICKS);
        }
        if state.dead > DEATH_RESTART_TICKS && !state.restart_requested {
            state.restart_requested = true;
            state.events.push(GameEvent::RestartLevel);
            log::info!("Restarting level");
        }
    } else {
        let center = state.player.body.center();
        if center.y.abs() >= FALL_DEATH_Y {
            log::debug!("Player fell off the map at y = {:.0}", center.y);
            state.dead += 1;
            state.events.push(GameEvent::PlayerHit { pos: center });
        }
    }
}

/// Roll every leaf emitter once
fn spawn_leaves(state: &mut GameState, spawns: &mut SpawnQueue) {
    let (vx, vy) = LEAF_VELOCITY;
    for emitter in &state.leaf_emitters {
        if state.rng.random::<f32>() * LEAF_SPAWN_DIVISOR < emitter.area() as f32 {
            let pos = Vec2::new(
                emitter.x as f32 + state.rng.random::<f32>() * emitter.w as f32,
                emitter.y as f32 + state.rng.random::<f32>() * emitter.h as f32,
            );
            let start = state.rng.random_range(0..=20);
            spawns.particles.push(Particle::new(
                ParticleKind::Leaf,
                pos,
                Vec2::new(vx, vy),
                start,
            ));
        }
    }
}

/// Append a phase's spawns to the live containers
fn absorb(state: &mut GameState, spawns: SpawnQueue, settings: &Settings) {
    state.sparks.extend(spawns.sparks);
    state.projectiles.extend(spawns.projectiles);

    let room = settings
        .max_particles()
        .saturating_sub(state.particles.len());
    state.particles.extend(spawns.particles.into_iter().take(room));

    state.events.extend(spawns.events);
    if spawns.screen_shake > 0.0 && settings.effective_screen_shake() {
        state.screen_shake = state.screen_shake.max(spawns.screen_shake);
        state.events.push(GameEvent::ScreenShake {
            magnitude: spawns.screen_shake,
        });
    }
}
