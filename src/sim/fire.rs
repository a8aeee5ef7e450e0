//! Targeted fire: drones and the boss shoot straight at the player's center

use glam::Vec2;

use super::geometry::Bounded;
use super::state::{Projectile, World};

/// Velocity of magnitude `speed` pointing from `from` toward `to`.
///
/// A zero-length offset is divided by 1 instead, yielding a zero velocity.
pub fn aim_velocity(from: Vec2, to: Vec2, speed: f32) -> Vec2 {
    let diff = to - from;
    let mut dist = diff.length();
    if dist == 0.0 {
        dist = 1.0;
    }
    diff / dist * speed
}

/// Spawn a projectile centered on `source_center`, aimed at the player
pub fn fire_at_player(world: &mut World, source_center: Vec2) {
    let target = world.player.center();
    let size = world.tuning.projectile_dims();
    let vel = aim_velocity(source_center, target, world.tuning.projectile_speed);
    let projectile = Projectile {
        id: world.next_entity_id(),
        pos: source_center - size / 2.0,
        size,
        vel,
        bounce_count: 0,
    };
    world.projectiles.push(projectile);
}
