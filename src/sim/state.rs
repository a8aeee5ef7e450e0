//! Game state and core simulation types
//!
//! All state that must be persisted for snapshot/determinism lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::{Bounded, Rect};
use super::spawn::spawn_initial_drones;
use crate::tuning::{Tuning, TuningError};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Drones drift down and shoot; eating them earns points
    Wave,
    /// A single boss replaces all drones
    BossBattle,
    /// Boss defeated, run ended
    Victory,
    /// Score reached zero, run ended
    GameOver,
}

impl GamePhase {
    /// Terminal phases stop the tick loop until a reset
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Victory | GamePhase::GameOver)
    }
}

/// Something that happened during a tick, surfaced to the host as a status message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    SessionStarted,
    DroneEaten { points: u64 },
    PlayerHit { penalty: u64, score: u64 },
    GameOver,
    BossIntro { health: u32 },
    BossDamaged { health: u32 },
    BossDefeated { final_score: u64 },
    BossFightAborted,
}

impl GameEvent {
    /// Human-readable status line for the message board
    pub fn message(&self) -> String {
        match self {
            GameEvent::SessionStarted => {
                "Use Arrow Keys/WASD. Eat AI! Avoid lasers! Hit Boss to win!".to_string()
            }
            GameEvent::DroneEaten { points } => format!("Ate AI! +{points} points!"),
            GameEvent::PlayerHit { penalty, score } => {
                format!("Hit by laser! -{penalty} points! Score: {score}")
            }
            GameEvent::GameOver => "Hit! Score reached 0! Game Over!".to_string(),
            GameEvent::BossIntro { health } => {
                format!("BOSS BATTLE! Hit the Boss {health} times!")
            }
            GameEvent::BossDamaged { health } => format!("Boss Hit! {health} HP remaining."),
            GameEvent::BossDefeated { final_score } => {
                format!("BOSS DEFEATED! YOU WIN! Final Score: {final_score}")
            }
            GameEvent::BossFightAborted => "Hit during Boss Battle! Score Reset!".to_string(),
        }
    }
}

/// The player-controlled avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Velocity applied this tick (derived from input, never carried over)
    #[serde(skip)]
    pub vel: Vec2,
    /// False while the boss-damage cooldown is running
    pub can_damage_boss: bool,
    /// Ticks left before the boss can be damaged again
    pub damage_cooldown_remaining: u32,
}

impl Player {
    /// Player centered horizontally, just above the floor
    pub fn new(tuning: &Tuning) -> Self {
        let size = tuning.player_dims();
        Self {
            pos: Vec2::new(
                tuning.bounds_width / 2.0 - size.x / 2.0,
                tuning.bounds_height - size.y - tuning.player_start_margin,
            ),
            size,
            vel: Vec2::ZERO,
            can_damage_boss: true,
            damage_cooldown_remaining: 0,
        }
    }

    /// Start the boss-damage cooldown
    pub fn begin_cooldown(&mut self, ticks: u32) {
        if ticks == 0 {
            return;
        }
        self.can_damage_boss = false;
        self.damage_cooldown_remaining = ticks;
    }

    /// Advance the cooldown by one tick
    pub fn tick_cooldown(&mut self) {
        if !self.can_damage_boss {
            self.damage_cooldown_remaining = self.damage_cooldown_remaining.saturating_sub(1);
            if self.damage_cooldown_remaining == 0 {
                self.can_damage_boss = true;
            }
        }
    }

    pub fn clear_cooldown(&mut self) {
        self.can_damage_boss = true;
        self.damage_cooldown_remaining = 0;
    }
}

/// A basic enemy that drifts downward and shoots at the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drone {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    /// Downward drift per tick
    pub speed: f32,
    pub shoot_timer: u32,
    pub shoot_interval: u32,
}

/// A bouncing laser bolt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub bounce_count: u32,
}

/// The boss adversary (present only during a boss battle)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub pos: Vec2,
    pub size: Vec2,
    /// Signed horizontal speed; sign is the current direction
    pub vel_x: f32,
    pub health: u32,
    pub max_health: u32,
    /// Ticks left on the hit flash effect
    pub hit_flash_timer: u32,
    pub shoot_timer: u32,
    pub shoot_interval: u32,
}

impl Boss {
    /// Full-health boss at top-center, heading right
    pub fn new(tuning: &Tuning) -> Self {
        let size = tuning.boss_dims();
        Self {
            pos: Vec2::new(tuning.bounds_width / 2.0 - size.x / 2.0, tuning.boss_spawn_y),
            size,
            vel_x: tuning.boss_speed,
            health: tuning.boss_max_health,
            max_health: tuning.boss_max_health,
            hit_flash_timer: 0,
            shoot_timer: 0,
            shoot_interval: tuning.boss_shoot_interval,
        }
    }

    /// Fraction of health remaining (for health bars)
    pub fn health_fraction(&self) -> f32 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.health as f32 / self.max_health as f32
    }
}

impl Bounded for Player {
    fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

impl Bounded for Drone {
    fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

impl Bounded for Projectile {
    fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

impl Bounded for Boss {
    fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// Complete game state for one session (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Balance values this session was built with
    pub tuning: Tuning,
    /// Session seed for reproducibility
    pub seed: u64,
    /// Session RNG; every random draw goes through it
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub score: u64,
    pub player: Player,
    /// Active drones in spawn order
    pub drones: Vec<Drone>,
    /// Active projectiles in fire order
    pub projectiles: Vec<Projectile>,
    pub boss: Option<Boss>,
    /// Events raised during the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl World {
    /// Create a fresh session in the Wave phase with a full drone wave.
    ///
    /// Fails if `tuning` does not pass [`Tuning::validate`].
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::start(tuning, seed))
    }

    /// Build a session from an already validated tuning
    pub(crate) fn start(tuning: Tuning, seed: u64) -> Self {
        let player = Player::new(&tuning);
        let mut world = Self {
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            phase: GamePhase::Wave,
            score: 0,
            player,
            drones: Vec::new(),
            projectiles: Vec::new(),
            boss: None,
            events: Vec::new(),
            next_id: 1,
        };

        spawn_initial_drones(&mut world);
        world.events.push(GameEvent::SessionStarted);
        log::info!("Session started with seed {}", seed);

        world
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// True while the boss fight is running
    pub fn boss_active(&self) -> bool {
        self.phase == GamePhase::BossBattle
    }

    pub fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Deduct points, flooring at zero
    pub fn deduct_score(&mut self, points: u64) {
        self.score = self.score.saturating_sub(points);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_world_starts_in_wave() {
        let world = World::new(Tuning::default(), 7).unwrap();
        assert_eq!(world.phase, GamePhase::Wave);
        assert_eq!(world.score, 0);
        assert_eq!(world.drones.len(), world.tuning.max_drones);
        assert!(world.projectiles.is_empty());
        assert!(world.boss.is_none());
        assert_eq!(world.events, vec![GameEvent::SessionStarted]);
    }

    #[test]
    fn test_player_starts_centered_above_floor() {
        let tuning = Tuning::default();
        let player = Player::new(&tuning);
        assert_eq!(player.pos, Vec2::new(385.0, 560.0));
        assert!(player.can_damage_boss);
        assert_eq!(player.damage_cooldown_remaining, 0);
    }

    #[test]
    fn test_new_rejects_invalid_tuning() {
        let chance = World::new(
            Tuning {
                drone_spawn_chance: 1.5,
                ..Default::default()
            },
            1,
        );
        assert!(matches!(chance, Err(TuningError::SpawnChance(_))));

        let interval = World::new(
            Tuning {
                drone_shoot_interval_min: 5,
                drone_shoot_interval_max: 5,
                ..Default::default()
            },
            1,
        );
        assert!(matches!(
            interval,
            Err(TuningError::EmptyShootRange { min: 5, max: 5 })
        ));
    }

    #[test]
    fn test_score_floors_at_zero() {
        let mut world = World::new(Tuning::default(), 1).unwrap();
        world.add_score(15);
        world.deduct_score(20);
        assert_eq!(world.score, 0);
    }

    #[test]
    fn test_cooldown_counts_down_then_clears() {
        let mut player = Player::new(&Tuning::default());
        player.begin_cooldown(3);
        assert!(!player.can_damage_boss);

        let mut seen = Vec::new();
        while !player.can_damage_boss {
            player.tick_cooldown();
            seen.push(player.damage_cooldown_remaining);
        }
        assert_eq!(seen, vec![2, 1, 0]);
    }

    #[test]
    fn test_event_messages() {
        assert_eq!(
            GameEvent::DroneEaten { points: 10 }.message(),
            "Ate AI! +10 points!"
        );
        assert_eq!(
            GameEvent::PlayerHit { penalty: 10, score: 40 }.message(),
            "Hit by laser! -10 points! Score: 40"
        );
        assert_eq!(
            GameEvent::BossDamaged { health: 3 }.message(),
            "Boss Hit! 3 HP remaining."
        );
        assert_eq!(
            GameEvent::BossIntro { health: 10 }.message(),
            "BOSS BATTLE! Hit the Boss 10 times!"
        );
    }

    #[test]
    fn test_boss_spawns_top_center_at_full_health() {
        let tuning = Tuning::default();
        let boss = Boss::new(&tuning);
        assert_eq!(boss.pos, Vec2::new(360.0, 50.0));
        assert_eq!(boss.health, 10);
        assert_eq!(boss.health_fraction(), 1.0);
        assert_eq!(boss.vel_x, 2.0);
    }
}
