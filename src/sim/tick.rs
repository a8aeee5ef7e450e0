//! Frame orchestration
//!
//! One tick: input → motion → collision → phase check, then a read-only
//! snapshot is handed back to the host for rendering.

use rand::Rng;

use super::collision::resolve_collisions;
use super::motion::{step_boss, step_drones, step_player, step_projectiles};
use super::state::{Boss, Drone, GameEvent, GamePhase, Player, Projectile, World};

/// Directions held during a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl TickInput {
    /// Build input from the identifiers of currently held keys.
    ///
    /// Accepts arrow keys and WASD; anything else is ignored.
    pub fn from_held_keys<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
        let mut input = Self::default();
        for key in keys {
            match key {
                "ArrowUp" | "w" | "W" => input.up = true,
                "ArrowDown" | "s" | "S" => input.down = true,
                "ArrowLeft" | "a" | "A" => input.left = true,
                "ArrowRight" | "d" | "D" => input.right = true,
                _ => {}
            }
        }
        input
    }
}

/// Receives human-readable status messages (message board, log, ...)
pub trait MessageSink {
    fn show_message(&mut self, text: &str);
}

impl MessageSink for Vec<String> {
    fn show_message(&mut self, text: &str) {
        self.push(text.to_string());
    }
}

/// Read-only view of the world for the renderer
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub player: &'a Player,
    pub drones: &'a [Drone],
    pub projectiles: &'a [Projectile],
    pub boss: Option<&'a Boss>,
    pub score: u64,
    pub phase: GamePhase,
    /// Events raised during the tick that produced this snapshot
    pub events: &'a [GameEvent],
}

impl<'a> Snapshot<'a> {
    pub fn of(world: &'a World) -> Self {
        Self {
            player: &world.player,
            drones: &world.drones,
            projectiles: &world.projectiles,
            boss: world.boss.as_ref(),
            score: world.score,
            phase: world.phase,
            events: &world.events,
        }
    }

    /// The host should show a retry control that calls [`reset`]
    pub fn needs_retry(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Forward this tick's messages to a sink, oldest first
    pub fn dispatch(&self, sink: &mut impl MessageSink) {
        for event in self.events {
            sink.show_message(&event.message());
        }
    }
}

/// Advance the world by one frame.
///
/// Terminal phases (Victory/GameOver) are frozen: the world is left untouched
/// apart from clearing the previous tick's events.
pub fn tick<'a>(world: &'a mut World, input: &TickInput) -> Snapshot<'a> {
    world.events.clear();

    if world.phase.is_terminal() {
        return Snapshot::of(world);
    }

    world.time_ticks += 1;

    step_player(world, input);
    if world.phase == GamePhase::Wave {
        step_drones(world);
    }
    step_projectiles(world);
    step_boss(world);

    resolve_collisions(world);

    Snapshot::of(world)
}

/// Produce a fresh session with the same tuning.
///
/// The new seed is drawn from the old session's RNG, so a chain of resets
/// stays reproducible from the first seed. The tuning was already validated
/// when `world` was built.
pub fn reset(mut world: World) -> World {
    let seed = world.rng.random::<u64>();
    log::info!(
        "Resetting session (score {}, phase {:?})",
        world.score,
        world.phase
    );
    World::start(world.tuning, seed)
}
