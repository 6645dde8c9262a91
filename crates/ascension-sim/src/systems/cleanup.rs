//! Cleanup system: removes dead enemies and enemies that left the field.

use hecs::{Entity, World};

use ascension_core::components::Enemy;
use ascension_core::constants::ENEMY_EXIT_MARGIN;
use ascension_core::enums::EnemyKind;
use ascension_core::types::Position;

use crate::game_state::GameState;

/// Despawn enemies with no HP left and non-blue enemies below the bottom edge.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(
    world: &mut World,
    state: &mut GameState,
    field_height: f32,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    for (entity, (pos, enemy)) in world.query_mut::<(&Position, &Enemy)>() {
        let exited = enemy.kind != EnemyKind::Blue && pos.0.y > field_height + ENEMY_EXIT_MARGIN;
        if enemy.is_dead() || exited {
            if enemy.kind == EnemyKind::Blue {
                state.blue_alive = state.blue_alive.saturating_sub(1);
            }
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
