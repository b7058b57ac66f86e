//! Ninja sim headless runner
//!
//! Builds a small level in code and plays a scripted input sequence,
//! logging the events each tick produces. `RUST_LOG=debug` shows kills and
//! shots as well.
//!
//! Usage: `ninja-sim --seed 7 --ticks 1200 --settings settings.json --quality high`

use std::path::PathBuf;

use clap::Parser;
use glam::Vec2;
use ninja_sim::consts::{SIM_HZ, TILE_SIZE};
use ninja_sim::sim::{GameEvent, GameState, LevelSpawns, TickInput, TileGrid, tick};
use ninja_sim::{QualityPreset, Settings};

const DEFAULT_SEED: u64 = 7;
const DEFAULT_TICKS: u64 = 20 * SIM_HZ as u64;

/// Headless ninja sim - scripted run over a demo level
#[derive(Parser, Debug)]
#[command(name = "ninja-sim")]
#[command(about = "Run the platformer simulation headless and log its events")]
struct Args {
    /// Random seed for deterministic runs
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = DEFAULT_TICKS)]
    ticks: u64,

    /// Effect settings JSON file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Quality preset override: low, medium or high
    #[arg(long, value_parser = parse_quality)]
    quality: Option<QualityPreset>,
}

fn parse_quality(s: &str) -> Result<QualityPreset, String> {
    QualityPreset::parse(s).ok_or_else(|| format!("unknown quality preset '{s}'"))
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut settings = match &args.settings {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    if let Some(quality) = args.quality {
        settings.quality = quality;
    }
    let (seed, ticks) = (args.seed, args.ticks);

    log::info!(
        "Ninja sim starting: seed {}, {} ticks, quality {}",
        seed,
        ticks,
        settings.quality.as_str()
    );

    let (tiles, spawns) = demo_level();
    let mut state = GameState::new(seed);
    state.load_level(&spawns);

    let mut levels_cleared = 0;
    for t in 0..ticks {
        let input = scripted_input(t);
        tick(&mut state, &tiles, &input, &settings);

        let mut reload = false;
        for event in &state.events {
            match event {
                GameEvent::LevelCleared => {
                    levels_cleared += 1;
                    reload = true;
                }
                GameEvent::RestartLevel => reload = true,
                GameEvent::ScreenShake { .. } => {}
                other => log::info!("[{:>5}] {:?}", state.time_ticks, other),
            }
        }
        if reload {
            state.load_level(&spawns);
        }
    }

    let player = state.player_snapshot();
    log::info!(
        "Finished after {} ticks: player at ({:.1}, {:.1}) {}, {} enemies left, {} levels cleared",
        state.time_ticks,
        player.pos.x,
        player.pos.y,
        player.action.as_str(),
        state.enemies.len(),
        levels_cleared
    );
}

/// A walled floor with a raised ledge, three enemies and one tree
fn demo_level() -> (TileGrid, LevelSpawns) {
    let mut tiles = TileGrid::default();
    tiles.fill_row(12, 0, 40);
    tiles.fill_column(0, 0, 12);
    tiles.fill_column(40, 0, 12);
    tiles.fill_row(8, 14, 22);

    let floor = (12 * TILE_SIZE) as f32;
    let spawns = LevelSpawns {
        player: Vec2::new(32.0, floor - 15.0),
        enemies: vec![
            Vec2::new(160.0, floor - 15.0),
            Vec2::new(280.0, (8 * TILE_SIZE) as f32 - 15.0),
            Vec2::new(520.0, floor - 15.0),
        ],
        trees: vec![Vec2::new(400.0, floor - 64.0)],
    };
    (tiles, spawns)
}

/// Run right, hopping and dashing on a fixed rhythm, turning back every
/// five seconds
fn scripted_input(t: u64) -> TickInput {
    let leg = t / (5 * SIM_HZ as u64);
    TickInput {
        movement: if leg % 2 == 0 { 1.0 } else { -1.0 },
        jump: t % 45 == 0,
        dash: t % 70 == 10,
    }
}
