//! Tarantula Arcade - a 2D drone-eating arcade game with a boss fight
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, bounce physics, collisions, phases)
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use sim::{GameEvent, GamePhase, MessageSink, Snapshot, TickInput, World, reset, tick};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Playfield dimensions
    pub const BOUNDS_WIDTH: f32 = 800.0;
    pub const BOUNDS_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 30.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Gap between the player's bottom edge and the playfield floor at spawn
    pub const PLAYER_START_MARGIN: f32 = 10.0;
    /// Ticks the player must wait between boss hits
    pub const DAMAGE_COOLDOWN_TICKS: u32 = 30;

    /// Drone defaults
    pub const DRONE_SIZE: f32 = 25.0;
    pub const DRONE_SPEED: f32 = 1.0;
    pub const MAX_DRONES: usize = 5;
    /// Per-tick chance of a random drone spawn while below the cap
    pub const DRONE_SPAWN_CHANCE: f64 = 0.01;
    pub const DRONE_SHOOT_INTERVAL_MIN: u32 = 100;
    pub const DRONE_SHOOT_INTERVAL_MAX: u32 = 250;

    /// Projectile defaults
    pub const PROJECTILE_WIDTH: f32 = 5.0;
    pub const PROJECTILE_HEIGHT: f32 = 10.0;
    /// Magnitude of the velocity vector
    pub const PROJECTILE_SPEED: f32 = 6.0;
    pub const PROJECTILE_MAX_BOUNCES: u32 = 3;

    /// Boss defaults
    pub const BOSS_SIZE: f32 = 80.0;
    pub const BOSS_SPEED: f32 = 2.0;
    pub const BOSS_SPAWN_Y: f32 = 50.0;
    pub const BOSS_SHOOT_INTERVAL: u32 = 50;
    pub const BOSS_MAX_HEALTH: u32 = 10;
    pub const BOSS_HIT_FLASH_TICKS: u32 = 5;

    /// Scoring
    pub const SCORE_TO_SPAWN_BOSS: u64 = 200;
    pub const POINTS_PER_DRONE: u64 = 10;
    pub const WAVE_HIT_PENALTY: u64 = 10;
    pub const BOSS_BATTLE_HIT_PENALTY: u64 = 20;
    pub const POINTS_FOR_BOSS: u64 = 100;
}
