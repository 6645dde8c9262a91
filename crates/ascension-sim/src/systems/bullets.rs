//! Bullet update: trail recording, homing steering, integration, ricochet
//! and off-screen removal.

use glam::Vec2;
use hecs::{Entity, World};

use ascension_core::components::{Bullet, Enemy, Trail};
use ascension_core::constants::*;
use ascension_core::enums::BulletOwner;
use ascension_core::events::EffectRequest;
use ascension_core::types::{Position, Velocity};

/// Advance every bullet by one tick.
pub fn run(
    world: &mut World,
    field_width: f32,
    field_height: f32,
    effects: &mut Vec<EffectRequest>,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    let enemy_positions: Vec<Vec2> = world
        .query::<(&Position, &Enemy)>()
        .iter()
        .map(|(_, (pos, _))| pos.0)
        .collect();

    for (entity, (pos, vel, bullet, trail)) in
        world.query_mut::<(&mut Position, &mut Velocity, &mut Bullet, &mut Trail)>()
    {
        trail.record(pos.0);

        let is_player = bullet.owner == BulletOwner::Player;
        if is_player && bullet.homing {
            if let Some(target) = nearest_within(pos.0, &enemy_positions, HOMING_RANGE) {
                vel.0 = steer_toward(pos.0, vel.0, target);
            }
        }

        pos.0 += vel.0;

        if is_player && bullet.ricochet && bullet.bounces > 0 {
            if pos.0.x <= 0.0 || pos.0.x >= field_width {
                vel.0.x = -vel.0.x;
                bullet.bounces -= 1;
                effects.push(EffectRequest::Ricochet {
                    x: pos.0.x,
                    y: pos.0.y,
                });
            }
            if pos.0.y <= 0.0 || pos.0.y >= field_height {
                vel.0.y = -vel.0.y;
                bullet.bounces -= 1;
                effects.push(EffectRequest::Ricochet {
                    x: pos.0.x,
                    y: pos.0.y,
                });
            }
        }

        if !in_play_area(pos.0, field_width, field_height) || bullet.bounces < 0 {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Whether a point lies inside the field extended by the off-screen margin.
pub fn in_play_area(point: Vec2, field_width: f32, field_height: f32) -> bool {
    let m = BULLET_OFFSCREEN_MARGIN;
    point.x > -m && point.x < field_width + m && point.y > -m && point.y < field_height + m
}

/// Nearest candidate strictly closer than `range`.
pub fn nearest_within(from: Vec2, candidates: &[Vec2], range: f32) -> Option<Vec2> {
    candidates
        .iter()
        .map(|&c| (c, from.distance(c)))
        .filter(|&(_, d)| d < range)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(c, _)| c)
}

/// Nudge `velocity` toward `target` and renormalise to homing speed.
/// Degenerate geometry leaves the velocity unchanged.
pub fn steer_toward(from: Vec2, velocity: Vec2, target: Vec2) -> Vec2 {
    let delta = target - from;
    let distance = delta.length();
    if distance <= 0.0 {
        return velocity;
    }
    let steered = velocity + delta / distance * HOMING_STEER;
    let speed = steered.length();
    if speed <= 0.0 {
        return velocity;
    }
    steered / speed * HOMING_BULLET_SPEED
}
