//! Tarantula Arcade headless host
//!
//! Drives the simulation with a simple chase autopilot, forwards status
//! messages to the log and presses "Retry" whenever a run ends.
//!
//! Usage: `tarantula-arcade [TUNING_JSON] [--seed N] [--frames N]`

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;

use tarantula_arcade::sim::{Bounded, MessageSink, Snapshot, TickInput, World, reset, tick};
use tarantula_arcade::{GamePhase, Tuning};

/// Frames run when `--frames` is not given (one minute at 60 Hz)
const DEFAULT_FRAMES: u64 = 60 * 60;

/// Status messages go to the log instead of a message board
struct LogSink;

impl MessageSink for LogSink {
    fn show_message(&mut self, text: &str) {
        log::info!("[message] {}", text);
    }
}

#[derive(Parser)]
#[command(name = "tarantula-arcade")]
#[command(about = "Run the arcade simulation headless with a chase autopilot")]
struct Options {
    /// Tuning JSON file; built-in defaults when omitted
    tuning: Option<PathBuf>,

    /// Seed for the first session
    #[arg(long, default_value_t = 0x5EED)]
    seed: u64,

    /// Number of frames to simulate
    #[arg(long, default_value_t = DEFAULT_FRAMES)]
    frames: u64,
}

fn load_tuning(path: Option<&Path>) -> Result<Tuning> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed reading {}", path.display()))?;
    let tuning =
        Tuning::from_json(&json).with_context(|| format!("invalid tuning {}", path.display()))?;
    log::info!("Loaded tuning from {}", path.display());
    Ok(tuning)
}

/// Steer toward the boss if there is one, otherwise the nearest drone
fn autopilot(world: &World) -> TickInput {
    let me = world.player.center();
    let target = match &world.boss {
        Some(boss) => Some(boss.center()),
        None => world
            .drones
            .iter()
            .map(|d| d.center())
            .min_by(|a, b| a.distance_squared(me).total_cmp(&b.distance_squared(me))),
    };

    let Some(target) = target else {
        return TickInput::default();
    };

    let delta = target - me;
    let deadzone = world.tuning.player_speed;
    TickInput {
        left: delta.x < -deadzone,
        right: delta.x > deadzone,
        up: delta.y < -deadzone,
        down: delta.y > deadzone,
    }
}

fn report(snapshot: &Snapshot<'_>, frame: u64) {
    let boss_hp = snapshot.boss.map(|b| b.health);
    log::debug!(
        "frame {}: phase={:?} score={} drones={} projectiles={} boss_hp={:?} player={:?}",
        frame,
        snapshot.phase,
        snapshot.score,
        snapshot.drones.len(),
        snapshot.projectiles.len(),
        boss_hp,
        snapshot.player.pos,
    );
}

fn run(options: Options) -> Result<()> {
    let tuning = load_tuning(options.tuning.as_deref())?;
    let mut world = World::new(tuning, options.seed).context("rejected tuning")?;
    let mut sink = LogSink;
    Snapshot::of(&world).dispatch(&mut sink);

    let mut victories = 0u32;
    let mut defeats = 0u32;
    let mut best = 0u64;

    for frame in 0..options.frames {
        let input = autopilot(&world);
        let snapshot = tick(&mut world, &input);
        snapshot.dispatch(&mut sink);
        if frame % 60 == 0 {
            report(&snapshot, frame);
        }

        if snapshot.needs_retry() {
            best = best.max(snapshot.score);
            match snapshot.phase {
                GamePhase::Victory => victories += 1,
                _ => defeats += 1,
            }
            log::info!("Retry? (frame {})", frame);
            world = reset(world);
            Snapshot::of(&world).dispatch(&mut sink);
        }
    }

    best = best.max(world.score);
    println!(
        "{} frames: {} victories, {} defeats, best score {}, player at {}",
        options.frames,
        victories,
        defeats,
        best,
        fmt_pos(world.player.pos)
    );
    Ok(())
}

fn fmt_pos(pos: Vec2) -> String {
    format!("({:.0}, {:.0})", pos.x, pos.y)
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Tarantula Arcade (headless) starting...");

    match run(Options::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
