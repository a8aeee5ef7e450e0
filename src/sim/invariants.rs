//! World invariant checks
//!
//! Used by tests and by hosts that want to assert a deserialized snapshot is
//! sane before resuming it.

use core::fmt;

use super::geometry::Bounded;
use super::state::{GamePhase, World};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    PlayerOutOfBounds,
    DronesDuringBossBattle,
    BossDuringWave,
    BossMissingInBattle,
    CooldownPairing,
    BossHealthRange,
    DroneCap,
    ProjectileBounceLimit,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlayerOutOfBounds => write!(f, "PLAYER_OUT_OF_BOUNDS"),
            Self::DronesDuringBossBattle => write!(f, "DRONES_DURING_BOSS_BATTLE"),
            Self::BossDuringWave => write!(f, "BOSS_DURING_WAVE"),
            Self::BossMissingInBattle => write!(f, "BOSS_MISSING_IN_BATTLE"),
            Self::CooldownPairing => write!(f, "COOLDOWN_PAIRING"),
            Self::BossHealthRange => write!(f, "BOSS_HEALTH_RANGE"),
            Self::DroneCap => write!(f, "DRONE_CAP"),
            Self::ProjectileBounceLimit => write!(f, "PROJECTILE_BOUNCE_LIMIT"),
        }
    }
}

impl std::error::Error for InvariantViolation {}

impl World {
    /// Check the between-tick invariants, reporting the first violation
    pub fn validate_invariants(&self) -> Result<(), InvariantViolation> {
        if !self.player.rect().within(self.tuning.bounds()) {
            return Err(InvariantViolation::PlayerOutOfBounds);
        }

        match self.phase {
            GamePhase::BossBattle => {
                if !self.drones.is_empty() {
                    return Err(InvariantViolation::DronesDuringBossBattle);
                }
                if self.boss.is_none() {
                    return Err(InvariantViolation::BossMissingInBattle);
                }
            }
            GamePhase::Wave => {
                if self.boss.is_some() {
                    return Err(InvariantViolation::BossDuringWave);
                }
            }
            GamePhase::Victory | GamePhase::GameOver => {}
        }

        let cooling = !self.player.can_damage_boss;
        if cooling != (self.player.damage_cooldown_remaining > 0) {
            return Err(InvariantViolation::CooldownPairing);
        }

        if let Some(boss) = &self.boss {
            if boss.health == 0 || boss.health > boss.max_health {
                return Err(InvariantViolation::BossHealthRange);
            }
        }

        if self.drones.len() > self.tuning.max_drones {
            return Err(InvariantViolation::DroneCap);
        }

        let max_bounces = self.tuning.projectile_max_bounces;
        if self.projectiles.iter().any(|p| p.bounce_count > max_bounces) {
            return Err(InvariantViolation::ProjectileBounceLimit);
        }

        Ok(())
    }
}
