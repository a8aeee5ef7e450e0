//! Drone and boss spawning
//!
//! Drones and the boss are mutually exclusive populations: entering the boss
//! battle clears every drone and projectile, and no drone spawns while it runs.

use glam::Vec2;
use rand::Rng;

use super::state::{Boss, Drone, GameEvent, GamePhase, World};

/// Draw a fresh shoot interval in `[min, max)` ticks
pub(crate) fn roll_shoot_interval(world: &mut World) -> u32 {
    let (min, max) = (
        world.tuning.drone_shoot_interval_min,
        world.tuning.drone_shoot_interval_max,
    );
    world.rng.random_range(min..max)
}

fn make_drone(world: &mut World, pos: Vec2) -> Drone {
    let shoot_interval = roll_shoot_interval(world);
    Drone {
        id: world.next_entity_id(),
        pos,
        size: world.tuning.drone_dims(),
        speed: world.tuning.drone_speed,
        shoot_timer: 0,
        shoot_interval,
    }
}

/// Add one drone just above the top edge at a random column.
///
/// Returns false (and does nothing) at the drone cap or during a boss battle.
pub fn spawn_drone(world: &mut World) -> bool {
    if world.drones.len() >= world.tuning.max_drones || world.boss_active() {
        return false;
    }
    let size = world.tuning.drone_size;
    let x = world.rng.random_range(0.0..world.tuning.bounds_width - size);
    let drone = make_drone(world, Vec2::new(x, -size));
    world.drones.push(drone);
    true
}

/// Per-tick random spawn roll used during the Wave phase
pub fn roll_drone_spawn(world: &mut World) -> bool {
    if world.drones.len() >= world.tuning.max_drones || world.boss_active() {
        return false;
    }
    let chance = world.tuning.drone_spawn_chance;
    world.rng.random_bool(chance) && spawn_drone(world)
}

/// Replace all drones with a full, evenly spaced wave across the top quarter
pub fn spawn_initial_drones(world: &mut World) {
    world.drones.clear();

    let count = world.tuning.max_drones;
    let spacing = world.tuning.bounds_width / (count + 1) as f32;
    let half = world.tuning.drone_size / 2.0;
    let max_y = world.tuning.bounds_height / 4.0;

    for i in 0..count {
        let x = spacing * (i + 1) as f32 - half;
        let y = world.rng.random_range(0.0..max_y);
        let drone = make_drone(world, Vec2::new(x, y));
        world.drones.push(drone);
    }
}

/// Start the boss battle.
///
/// No-op (returns false) if the battle is already running.
pub fn spawn_boss(world: &mut World) -> bool {
    if world.boss_active() {
        return false;
    }

    world.drones.clear();
    world.projectiles.clear();
    let boss = Boss::new(&world.tuning);
    let health = boss.health;
    world.boss = Some(boss);
    world.phase = GamePhase::BossBattle;

    world.events.push(GameEvent::BossIntro { health });
    log::info!("Boss battle started at score {}", world.score);
    true
}
