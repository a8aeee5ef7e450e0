//! Per-tick motion and physics
//!
//! Runs before collision resolution: player input integration and clamping,
//! drone drift, projectile wall bounces, boss patrol, and timed shooting.

use glam::Vec2;
use rand::Rng;

use super::fire::fire_at_player;
use super::geometry::Bounded;
use super::spawn::roll_drone_spawn;
use super::state::{Projectile, World};
use super::tick::TickInput;

/// Sum of unit impulses from held directions, scaled by `speed`.
///
/// Opposite keys cancel; diagonals are not normalized.
pub fn player_velocity(input: &TickInput, speed: f32) -> Vec2 {
    let mut dir = Vec2::ZERO;
    if input.left {
        dir.x -= 1.0;
    }
    if input.right {
        dir.x += 1.0;
    }
    if input.up {
        dir.y -= 1.0;
    }
    if input.down {
        dir.y += 1.0;
    }
    dir * speed
}

/// Cooldown countdown, input integration, then clamp into the playfield
pub fn step_player(world: &mut World, input: &TickInput) {
    let bounds = world.tuning.bounds();
    let player = &mut world.player;

    player.tick_cooldown();

    player.vel = player_velocity(input, world.tuning.player_speed);
    player.pos += player.vel;

    let max = (bounds - player.size).max(Vec2::ZERO);
    player.pos = player.pos.clamp(Vec2::ZERO, max);
}

/// Random spawn roll, downward drift, off-screen culling, shooting
pub fn step_drones(world: &mut World) {
    roll_drone_spawn(world);

    let height = world.tuning.bounds_height;
    for drone in &mut world.drones {
        drone.pos.y += drone.speed;
    }
    world.drones.retain(|d| d.pos.y <= height);

    let (min, max) = (
        world.tuning.drone_shoot_interval_min,
        world.tuning.drone_shoot_interval_max,
    );
    let mut shooters = Vec::new();
    for drone in &mut world.drones {
        drone.shoot_timer += 1;
        if drone.shoot_timer >= drone.shoot_interval {
            shooters.push(drone.center());
            drone.shoot_timer = 0;
            drone.shoot_interval = world.rng.random_range(min..max);
        }
    }
    for origin in shooters {
        fire_at_player(world, origin);
    }
}

/// Reflect off each playfield edge the projectile reached.
///
/// Axes are tested independently, so a corner hit flips both components.
/// Returns true if any reflection happened.
pub fn bounce_off_walls(projectile: &mut Projectile, bounds: Vec2) -> bool {
    let mut bounced = false;

    if projectile.pos.x <= 0.0 {
        projectile.vel.x = -projectile.vel.x;
        projectile.pos.x = 0.0;
        bounced = true;
    } else if projectile.pos.x + projectile.size.x >= bounds.x {
        projectile.vel.x = -projectile.vel.x;
        projectile.pos.x = bounds.x - projectile.size.x;
        bounced = true;
    }

    if projectile.pos.y <= 0.0 {
        projectile.vel.y = -projectile.vel.y;
        projectile.pos.y = 0.0;
        bounced = true;
    } else if projectile.pos.y + projectile.size.y >= bounds.y {
        projectile.vel.y = -projectile.vel.y;
        projectile.pos.y = bounds.y - projectile.size.y;
        bounced = true;
    }

    bounced
}

/// Integrate projectiles; one bounce count per tick at most, expire past the limit
pub fn step_projectiles(world: &mut World) {
    let bounds = world.tuning.bounds();
    let max_bounces = world.tuning.projectile_max_bounces;

    for projectile in &mut world.projectiles {
        projectile.pos += projectile.vel;
        if bounce_off_walls(projectile, bounds) {
            projectile.bounce_count += 1;
        }
    }

    let before = world.projectiles.len();
    world.projectiles.retain(|p| p.bounce_count <= max_bounces);
    let expired = before - world.projectiles.len();
    if expired > 0 {
        log::debug!("{} projectile(s) expired after {} bounces", expired, max_bounces);
    }
}

/// Horizontal patrol, hit-flash decay, timed shooting
pub fn step_boss(world: &mut World) {
    let width = world.tuning.bounds_width;
    let Some(boss) = world.boss.as_mut() else {
        return;
    };

    boss.hit_flash_timer = boss.hit_flash_timer.saturating_sub(1);

    boss.pos.x += boss.vel_x;
    if boss.pos.x <= 0.0 || boss.pos.x + boss.size.x >= width {
        boss.vel_x = -boss.vel_x;
    }

    boss.shoot_timer += 1;
    if boss.shoot_timer >= boss.shoot_interval {
        boss.shoot_timer = 0;
        let origin = boss.center();
        fire_at_player(world, origin);
    }
}
