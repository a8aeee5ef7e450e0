//! Data-driven game balance
//!
//! Every size, speed, interval and scoring rule the simulation uses. Loaded
//! from JSON by the host; missing fields fall back to the defaults in `consts`.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Reasons a tuning file is rejected
#[derive(Debug)]
pub enum TuningError {
    /// The JSON could not be parsed
    Parse(serde_json::Error),
    /// An entity does not fit inside the playfield
    EntityTooLarge(&'static str),
    /// A value that must be positive was zero or negative
    NonPositive(&'static str),
    /// Drone shoot interval range is empty
    EmptyShootRange { min: u32, max: u32 },
    /// Spawn chance outside [0, 1]
    SpawnChance(f64),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "invalid tuning JSON: {e}"),
            Self::EntityTooLarge(what) => write!(f, "{what} does not fit inside the playfield"),
            Self::NonPositive(what) => write!(f, "{what} must be greater than zero"),
            Self::EmptyShootRange { min, max } => {
                write!(f, "drone shoot interval range [{min}, {max}) is empty")
            }
            Self::SpawnChance(p) => write!(f, "drone spawn chance {p} is outside [0, 1]"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Fixed configuration supplied at World construction time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub bounds_width: f32,
    pub bounds_height: f32,

    // === Player ===
    pub player_size: f32,
    pub player_speed: f32,
    pub player_start_margin: f32,
    pub damage_cooldown_ticks: u32,

    // === Drones ===
    pub drone_size: f32,
    pub drone_speed: f32,
    pub max_drones: usize,
    pub drone_spawn_chance: f64,
    /// Inclusive lower bound of the per-drone shoot interval (ticks)
    pub drone_shoot_interval_min: u32,
    /// Exclusive upper bound of the per-drone shoot interval (ticks)
    pub drone_shoot_interval_max: u32,

    // === Projectiles ===
    pub projectile_width: f32,
    pub projectile_height: f32,
    pub projectile_speed: f32,
    pub projectile_max_bounces: u32,

    // === Boss ===
    pub boss_size: f32,
    pub boss_speed: f32,
    pub boss_spawn_y: f32,
    pub boss_shoot_interval: u32,
    pub boss_max_health: u32,
    pub boss_hit_flash_ticks: u32,

    // === Scoring ===
    pub score_to_spawn_boss: u64,
    pub points_per_drone: u64,
    pub wave_hit_penalty: u64,
    pub boss_battle_hit_penalty: u64,
    pub points_for_boss: u64,

    // === Rules ===
    /// Any projectile hit during a boss battle zeroes the score and sends
    /// the session back to a fresh drone wave instead of costing a penalty.
    pub abort_boss_fight_on_hit: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            bounds_width: BOUNDS_WIDTH,
            bounds_height: BOUNDS_HEIGHT,

            player_size: PLAYER_SIZE,
            player_speed: PLAYER_SPEED,
            player_start_margin: PLAYER_START_MARGIN,
            damage_cooldown_ticks: DAMAGE_COOLDOWN_TICKS,

            drone_size: DRONE_SIZE,
            drone_speed: DRONE_SPEED,
            max_drones: MAX_DRONES,
            drone_spawn_chance: DRONE_SPAWN_CHANCE,
            drone_shoot_interval_min: DRONE_SHOOT_INTERVAL_MIN,
            drone_shoot_interval_max: DRONE_SHOOT_INTERVAL_MAX,

            projectile_width: PROJECTILE_WIDTH,
            projectile_height: PROJECTILE_HEIGHT,
            projectile_speed: PROJECTILE_SPEED,
            projectile_max_bounces: PROJECTILE_MAX_BOUNCES,

            boss_size: BOSS_SIZE,
            boss_speed: BOSS_SPEED,
            boss_spawn_y: BOSS_SPAWN_Y,
            boss_shoot_interval: BOSS_SHOOT_INTERVAL,
            boss_max_health: BOSS_MAX_HEALTH,
            boss_hit_flash_ticks: BOSS_HIT_FLASH_TICKS,

            score_to_spawn_boss: SCORE_TO_SPAWN_BOSS,
            points_per_drone: POINTS_PER_DRONE,
            wave_hit_penalty: WAVE_HIT_PENALTY,
            boss_battle_hit_penalty: BOSS_BATTLE_HIT_PENALTY,
            points_for_boss: POINTS_FOR_BOSS,

            abort_boss_fight_on_hit: false,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check that the World invariants can hold under this configuration
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("bounds_width", self.bounds_width),
            ("bounds_height", self.bounds_height),
            ("player_size", self.player_size),
            ("drone_size", self.drone_size),
            ("projectile_width", self.projectile_width),
            ("projectile_height", self.projectile_height),
            ("projectile_speed", self.projectile_speed),
            ("boss_size", self.boss_size),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(TuningError::NonPositive(name));
            }
        }
        if self.boss_max_health == 0 {
            return Err(TuningError::NonPositive("boss_max_health"));
        }
        if self.boss_shoot_interval == 0 {
            return Err(TuningError::NonPositive("boss_shoot_interval"));
        }
        if self.drone_shoot_interval_min == 0
            || self.drone_shoot_interval_min >= self.drone_shoot_interval_max
        {
            return Err(TuningError::EmptyShootRange {
                min: self.drone_shoot_interval_min,
                max: self.drone_shoot_interval_max,
            });
        }
        if !(0.0..=1.0).contains(&self.drone_spawn_chance) {
            return Err(TuningError::SpawnChance(self.drone_spawn_chance));
        }

        let bounds = self.bounds();
        let fits = |size: Vec2| size.x <= bounds.x && size.y <= bounds.y;
        if !fits(self.player_dims()) || self.player_size + self.player_start_margin > bounds.y {
            return Err(TuningError::EntityTooLarge("player"));
        }
        // Strictly smaller so every drone column has a non-empty x range
        if self.drone_size >= bounds.x {
            return Err(TuningError::EntityTooLarge("drone"));
        }
        if !fits(self.boss_dims()) || self.boss_spawn_y + self.boss_size > bounds.y {
            return Err(TuningError::EntityTooLarge("boss"));
        }
        if !fits(self.projectile_dims()) {
            return Err(TuningError::EntityTooLarge("projectile"));
        }
        Ok(())
    }

    /// Playfield size as a vector
    #[inline]
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.bounds_width, self.bounds_height)
    }

    #[inline]
    pub fn player_dims(&self) -> Vec2 {
        Vec2::splat(self.player_size)
    }

    #[inline]
    pub fn drone_dims(&self) -> Vec2 {
        Vec2::splat(self.drone_size)
    }

    #[inline]
    pub fn boss_dims(&self) -> Vec2 {
        Vec2::splat(self.boss_size)
    }

    #[inline]
    pub fn projectile_dims(&self) -> Vec2 {
        Vec2::new(self.projectile_width, self.projectile_height)
    }

    /// Score lost to a projectile hit in the given battle state
    pub fn hit_penalty(&self, boss_battle: bool) -> u64 {
        if boss_battle {
            self.boss_battle_hit_penalty
        } else {
            self.wave_hit_penalty
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.max_drones, 5);
        assert_eq!(tuning.score_to_spawn_boss, 200);
        assert!(!tuning.abort_boss_fight_on_hit);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "max_drones": 8, "boss_max_health": 3 }"#).unwrap();
        assert_eq!(tuning.max_drones, 8);
        assert_eq!(tuning.boss_max_health, 3);
        assert_eq!(tuning.bounds_width, BOUNDS_WIDTH);
        assert_eq!(tuning.player_speed, PLAYER_SPEED);
    }

    #[test]
    fn test_rejects_bad_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_rejects_oversized_boss() {
        let err = Tuning::from_json(r#"{ "bounds_width": 60.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::EntityTooLarge("boss")));
        assert_eq!(err.to_string(), "boss does not fit inside the playfield");
    }

    #[test]
    fn test_rejects_empty_shoot_range() {
        let tuning = Tuning {
            drone_shoot_interval_min: 200,
            drone_shoot_interval_max: 200,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::EmptyShootRange { min: 200, max: 200 })
        ));
    }

    #[test]
    fn test_rejects_spawn_chance_out_of_range() {
        let tuning = Tuning {
            drone_spawn_chance: 1.5,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(TuningError::SpawnChance(_))));
    }

    #[test]
    fn test_rejects_zero_projectile_speed() {
        let tuning = Tuning {
            projectile_speed: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NonPositive("projectile_speed"))
        ));
    }

    #[test]
    fn test_hit_penalty_by_phase() {
        let tuning = Tuning::default();
        assert_eq!(tuning.hit_penalty(false), 10);
        assert_eq!(tuning.hit_penalty(true), 20);
    }
}
