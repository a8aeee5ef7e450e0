//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, no wall-clock time
//! - Seeded RNG only (stored in the World)
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod fire;
pub mod geometry;
pub mod invariants;
pub mod motion;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{HitOutcome, resolve_collisions};
pub use fire::{aim_velocity, fire_at_player};
pub use geometry::{Bounded, Rect, overlaps};
pub use invariants::InvariantViolation;
pub use spawn::{spawn_boss, spawn_drone, spawn_initial_drones};
pub use state::{Boss, Drone, GameEvent, GamePhase, Player, Projectile, World};
pub use tick::{MessageSink, Snapshot, TickInput, reset, tick};
