//! Enemy update: evaluates the behaviour FSM for each enemy and fires the
//! blue enemies' aimed shots.

use glam::Vec2;
use hecs::World;

use ascension_core::components::Enemy;
use ascension_core::types::{Position, Velocity};

use ascension_enemy_ai::fsm::{evaluate, EnemyContext};

use crate::world_setup;

/// Run enemy behaviour for one tick.
pub fn run(
    world: &mut World,
    player_position: Vec2,
    field_width: f32,
    field_height: f32,
) {
    let mut shots: Vec<(Vec2, Vec2)> = Vec::new();

    for (_entity, (pos, vel, enemy)) in
        world.query_mut::<(&mut Position, &mut Velocity, &mut Enemy)>()
    {
        let ctx = EnemyContext {
            behavior: enemy.behavior,
            position: pos.0,
            velocity: vel.0,
            size: enemy.size,
            field_width,
            field_height,
            player_position,
        };
        let update = evaluate(&ctx);
        enemy.behavior = update.behavior;
        pos.0 = update.position;
        vel.0 = update.velocity;

        if let Some(shot) = update.shot {
            shots.push((pos.0, shot));
        }
    }

    for (origin, velocity) in shots {
        world_setup::spawn_enemy_bullet(world, origin, velocity);
    }
}
