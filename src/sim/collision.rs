//! Collision detection and response
//!
//! Resolved once per tick after motion, in fixed precedence: player vs
//! drones, then player vs projectiles, then player vs boss. Each category is
//! fully resolved before the next begins.

use super::geometry::{Bounded, overlaps};
use super::spawn::{spawn_boss, spawn_initial_drones};
use super::state::{Drone, GameEvent, GamePhase, World};

/// Outcome of the projectile pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// No projectile touched the player
    Miss,
    /// Player was hit and the session continues
    Hit,
    /// The hit ended the session; no further collision processing this tick
    GameOver,
}

/// Run every collision category for this tick
pub fn resolve_collisions(world: &mut World) {
    player_vs_drones(world);
    if player_vs_projectiles(world) == HitOutcome::GameOver {
        return;
    }
    player_vs_boss(world);
}

/// Eat every drone the player overlaps.
///
/// Crossing the boss threshold starts the boss battle immediately, which
/// clears the remaining drones.
pub fn player_vs_drones(world: &mut World) {
    let player = world.player.rect();
    let (eaten, kept): (Vec<Drone>, Vec<Drone>) = world
        .drones
        .drain(..)
        .partition(|d| player.intersects(&d.rect()));
    world.drones = kept;

    let points = world.tuning.points_per_drone;
    for drone in eaten {
        world.add_score(points);
        world.events.push(GameEvent::DroneEaten { points });
        log::debug!("Drone {} eaten, score {}", drone.id, world.score);

        if world.score >= world.tuning.score_to_spawn_boss && !world.boss_active() {
            spawn_boss(world);
            break;
        }
    }
}

/// Apply at most one projectile hit to the player this tick
pub fn player_vs_projectiles(world: &mut World) -> HitOutcome {
    let player = world.player.rect();
    let Some(index) = world
        .projectiles
        .iter()
        .position(|p| player.intersects(&p.rect()))
    else {
        return HitOutcome::Miss;
    };
    world.projectiles.remove(index);

    let boss_battle = world.boss_active();
    if boss_battle && world.tuning.abort_boss_fight_on_hit {
        abort_boss_fight(world);
        return HitOutcome::Hit;
    }

    let penalty = world.tuning.hit_penalty(boss_battle);
    world.deduct_score(penalty);
    log::debug!("Player hit, -{} points, score {}", penalty, world.score);

    if world.score == 0 {
        trigger_game_over(world);
        return HitOutcome::GameOver;
    }

    world.events.push(GameEvent::PlayerHit {
        penalty,
        score: world.score,
    });
    HitOutcome::Hit
}

/// Damage the boss on contact, gated by the player's cooldown
pub fn player_vs_boss(world: &mut World) {
    if !world.boss_active() || !world.player.can_damage_boss {
        return;
    }
    if !overlaps(Some(&world.player), world.boss.as_ref()) {
        return;
    }
    let Some(boss) = world.boss.as_mut() else {
        return;
    };

    boss.health = boss.health.saturating_sub(1);
    boss.hit_flash_timer = world.tuning.boss_hit_flash_ticks;
    let health = boss.health;
    world.player.begin_cooldown(world.tuning.damage_cooldown_ticks);

    if health == 0 {
        world.add_score(world.tuning.points_for_boss);
        world.boss = None;
        world.phase = GamePhase::Victory;
        world.events.push(GameEvent::BossDefeated {
            final_score: world.score,
        });
        log::info!("Boss defeated, final score {}", world.score);
    } else {
        world.events.push(GameEvent::BossDamaged { health });
        log::debug!("Boss hit, {} HP remaining", health);
    }
}

/// Score hit zero: end the session
fn trigger_game_over(world: &mut World) {
    world.phase = GamePhase::GameOver;
    world.events.push(GameEvent::GameOver);
    log::info!("Game over after {} ticks", world.time_ticks);
}

/// Punitive abort: zero the score, drop the boss, restart the drone wave
fn abort_boss_fight(world: &mut World) {
    world.score = 0;
    world.boss = None;
    world.phase = GamePhase::Wave;
    world.player.clear_cooldown();
    spawn_initial_drones(world);
    world.events.push(GameEvent::BossFightAborted);
    log::info!("Boss fight aborted by projectile hit");
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::sim::state::{Boss, Projectile};
    use crate::tuning::Tuning;

    fn world() -> World {
        World::new(Tuning::default(), 2024).unwrap()
    }

    /// Move drone `index` on top of the player
    fn drone_on_player(world: &mut World, index: usize) {
        world.drones[index].pos = world.player.pos;
    }

    fn projectile_on_player(world: &mut World) {
        let id = world.next_entity_id();
        world.projectiles.push(Projectile {
            id,
            pos: world.player.pos + Vec2::splat(5.0),
            size: world.tuning.projectile_dims(),
            vel: Vec2::new(0.0, 6.0),
            bounce_count: 0,
        });
    }

    fn boss_on_player(world: &mut World, health: u32) {
        world.phase = GamePhase::BossBattle;
        world.drones.clear();
        let mut boss = Boss::new(&world.tuning);
        boss.pos = world.player.pos - Vec2::splat(10.0);
        boss.health = health;
        world.boss = Some(boss);
    }

    #[test]
    fn test_eat_drone_scores_without_boss() {
        // Scenario A
        let mut world = world();
        drone_on_player(&mut world, 2);
        let before = world.drones.len();

        resolve_collisions(&mut world);
        assert_eq!(world.drones.len(), before - 1);
        assert_eq!(world.score, 10);
        assert_eq!(world.phase, GamePhase::Wave);
        assert!(world.boss.is_none());
        assert!(world.events.contains(&GameEvent::DroneEaten { points: 10 }));
    }

    #[test]
    fn test_eat_two_drones_same_tick() {
        let mut world = world();
        drone_on_player(&mut world, 0);
        drone_on_player(&mut world, 4);

        player_vs_drones(&mut world);
        assert_eq!(world.drones.len(), 3);
        assert_eq!(world.score, 20);
    }

    #[test]
    fn test_threshold_spawns_boss() {
        // Scenario B
        let mut world = world();
        world.score = 195;
        drone_on_player(&mut world, 0);
        projectile_on_player(&mut world);
        world.projectiles.push(Projectile {
            id: 500,
            pos: Vec2::new(10.0, 10.0),
            size: world.tuning.projectile_dims(),
            vel: Vec2::ZERO,
            bounce_count: 0,
        });

        player_vs_drones(&mut world);
        assert_eq!(world.score, 205);
        assert_eq!(world.phase, GamePhase::BossBattle);
        assert!(world.drones.is_empty());
        assert!(world.projectiles.is_empty());
        assert_eq!(world.boss.as_ref().unwrap().health, 10);
    }

    #[test]
    fn test_drones_after_boss_spawn_score_nothing() {
        let mut world = world();
        world.score = 190;
        drone_on_player(&mut world, 0);
        drone_on_player(&mut world, 1);
        drone_on_player(&mut world, 2);

        player_vs_drones(&mut world);
        assert_eq!(world.score, 200);
        assert_eq!(world.phase, GamePhase::BossBattle);
        assert!(world.drones.is_empty());
    }

    #[test]
    fn test_hit_in_wave_costs_penalty() {
        // Scenario D
        let mut world = world();
        world.score = 50;
        projectile_on_player(&mut world);

        assert_eq!(player_vs_projectiles(&mut world), HitOutcome::Hit);
        assert_eq!(world.score, 40);
        assert_eq!(world.phase, GamePhase::Wave);
        assert!(world.projectiles.is_empty());
        assert_eq!(world.drones.len(), world.tuning.max_drones);
        assert!(world.events.contains(&GameEvent::PlayerHit {
            penalty: 10,
            score: 40
        }));
    }

    #[test]
    fn test_hit_to_zero_in_boss_battle_is_game_over() {
        // Scenario C
        let mut world = world();
        world.score = 15;
        boss_on_player(&mut world, 5);
        projectile_on_player(&mut world);

        resolve_collisions(&mut world);
        assert_eq!(world.score, 0);
        assert_eq!(world.phase, GamePhase::GameOver);
        // Boss pass skipped after game over
        assert_eq!(world.boss.as_ref().unwrap().health, 5);
        assert!(world.player.can_damage_boss);
        assert_eq!(world.events.last(), Some(&GameEvent::GameOver));
    }

    #[test]
    fn test_boss_battle_hit_uses_larger_penalty() {
        let mut world = world();
        world.score = 300;
        world.phase = GamePhase::BossBattle;
        world.drones.clear();
        world.boss = Some(Boss::new(&world.tuning));
        projectile_on_player(&mut world);

        assert_eq!(player_vs_projectiles(&mut world), HitOutcome::Hit);
        assert_eq!(world.score, 280);
        assert_eq!(world.phase, GamePhase::BossBattle);
    }

    #[test]
    fn test_only_one_projectile_hit_per_tick() {
        let mut world = world();
        world.score = 100;
        projectile_on_player(&mut world);
        projectile_on_player(&mut world);
        let first_id = world.projectiles[0].id;

        player_vs_projectiles(&mut world);
        assert_eq!(world.score, 90);
        assert_eq!(world.projectiles.len(), 1);
        assert_ne!(world.projectiles[0].id, first_id);
    }

    #[test]
    fn test_abort_rule_returns_to_wave() {
        let mut world = World::new(
            Tuning {
                abort_boss_fight_on_hit: true,
                ..Default::default()
            },
            8,
        )
        .unwrap();
        world.score = 250;
        boss_on_player(&mut world, 7);
        world.player.begin_cooldown(12);
        projectile_on_player(&mut world);

        assert_eq!(player_vs_projectiles(&mut world), HitOutcome::Hit);
        assert_eq!(world.score, 0);
        assert_eq!(world.phase, GamePhase::Wave);
        assert!(world.boss.is_none());
        assert!(world.player.can_damage_boss);
        assert_eq!(world.drones.len(), world.tuning.max_drones);
        assert!(world.events.contains(&GameEvent::BossFightAborted));
    }

    #[test]
    fn test_boss_damage_starts_cooldown() {
        let mut world = world();
        boss_on_player(&mut world, 3);

        player_vs_boss(&mut world);
        let boss = world.boss.as_ref().unwrap();
        assert_eq!(boss.health, 2);
        assert_eq!(boss.hit_flash_timer, world.tuning.boss_hit_flash_ticks);
        assert!(!world.player.can_damage_boss);
        assert_eq!(
            world.player.damage_cooldown_remaining,
            world.tuning.damage_cooldown_ticks
        );
        assert!(world.events.contains(&GameEvent::BossDamaged { health: 2 }));

        // Sustained overlap does nothing while cooling down
        player_vs_boss(&mut world);
        assert_eq!(world.boss.as_ref().unwrap().health, 2);
    }

    #[test]
    fn test_final_boss_hit_is_victory() {
        // Scenario E
        let mut world = world();
        world.score = 210;
        boss_on_player(&mut world, 1);

        resolve_collisions(&mut world);
        assert_eq!(world.score, 310);
        assert_eq!(world.phase, GamePhase::Victory);
        assert!(world.boss.is_none());
        assert!(world.events.contains(&GameEvent::BossDefeated { final_score: 310 }));
    }

    #[test]
    fn test_boss_ignored_without_overlap() {
        let mut world = world();
        boss_on_player(&mut world, 4);
        world.boss.as_mut().unwrap().pos = Vec2::new(0.0, 0.0);

        player_vs_boss(&mut world);
        assert_eq!(world.boss.as_ref().unwrap().health, 4);
        assert!(world.player.can_damage_boss);
    }
}
