//! Collision resolution, run once per tick after movement.
//!
//! Order matters:
//! 1. player bullets against enemies, collecting kills in a removal set;
//! 2. enemy bullets against surviving player bullets, then the player;
//! 3. killed enemies and spent bullets are despawned;
//! 4. remaining enemies against the barrier or the player's hull;
//! 5. experience orbs are pulled in and collected, with level-ups resolved
//!    immediately.

use std::collections::HashSet;

use glam::Vec2;
use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use ascension_core::components::{Bullet, Enemy, ExpOrb, Player};
use ascension_core::constants::*;
use ascension_core::enums::{BulletOwner, EnemyKind};
use ascension_core::events::{EffectRequest, GameEvent};
use ascension_core::skills::SkillKind;
use ascension_core::types::{angle_between, circles_overlap, direction, Position, WallClockMs};

use crate::game_state::GameState;
use crate::scheduler::EventQueue;
use crate::systems::progression;
use crate::world_setup;

/// What the engine must follow up on after collisions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionOutcome {
    /// Levels reached through orb pickups this tick, in order.
    pub levels_reached: Vec<u32>,
    /// The player lost their last life this tick.
    pub player_died: bool,
}

/// Working copy of an enemy for the duration of one resolution pass.
struct EnemyState {
    entity: Entity,
    pos: Vec2,
    size: f32,
    hp: f32,
    kind: EnemyKind,
    value: u64,
}

struct BulletState {
    entity: Entity,
    pos: Vec2,
    bullet: Bullet,
}

/// Run collision resolution for one tick.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    player: &mut Player,
    state: &mut GameState,
    rng: &mut ChaCha8Rng,
    scheduler: &mut EventQueue,
    now: WallClockMs,
    events: &mut Vec<GameEvent>,
    effects: &mut Vec<EffectRequest>,
) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();

    let mut enemies: Vec<EnemyState> = world
        .query::<(&Position, &Enemy)>()
        .iter()
        .map(|(entity, (pos, enemy))| EnemyState {
            entity,
            pos: pos.0,
            size: enemy.size,
            hp: enemy.hp,
            kind: enemy.kind,
            value: enemy.value,
        })
        .collect();

    let (player_bullets, enemy_bullets): (Vec<BulletState>, Vec<BulletState>) = world
        .query::<(&Position, &Bullet)>()
        .iter()
        .map(|(entity, (pos, bullet))| BulletState {
            entity,
            pos: pos.0,
            bullet: bullet.clone(),
        })
        .partition(|b| b.bullet.owner == BulletOwner::Player);

    let mut removed_enemies: HashSet<usize> = HashSet::new();
    let mut removed_bullets: Vec<Entity> = Vec::new();
    let mut drops: Vec<(Vec2, u64)> = Vec::new();

    // 1. Player bullets against enemies.
    let mut surviving_player_bullets: Vec<&BulletState> = Vec::new();
    for shot in &player_bullets {
        let mut spent = false;
        for (index, enemy) in enemies.iter_mut().enumerate() {
            if removed_enemies.contains(&index) {
                continue;
            }
            if !circles_overlap(shot.pos, shot.bullet.size, enemy.pos, enemy.size) {
                continue;
            }
            enemy.hp -= shot.bullet.damage;
            effects.push(EffectRequest::Hit {
                x: enemy.pos.x,
                y: enemy.pos.y,
            });
            if enemy.hp <= 0.0 {
                removed_enemies.insert(index);
                record_kill(state, enemy, events, effects, &mut drops);
            }
            if !shot.bullet.pierce && !shot.bullet.is_laser {
                spent = true;
                break;
            }
        }
        if spent {
            removed_bullets.push(shot.entity);
        } else {
            surviving_player_bullets.push(shot);
        }
    }

    // 2. Enemy bullets: shot down by player bullets, otherwise against the player.
    for shot in &enemy_bullets {
        let intercepted = surviving_player_bullets
            .iter()
            .any(|p| circles_overlap(shot.pos, shot.bullet.size, p.pos, p.bullet.size));
        if intercepted {
            effects.push(EffectRequest::Hit {
                x: shot.pos.x,
                y: shot.pos.y,
            });
            removed_bullets.push(shot.entity);
            continue;
        }
        if !player.is_invulnerable()
            && circles_overlap(shot.pos, shot.bullet.size, player.pos, player.size)
        {
            outcome.player_died |= damage_player(player, events);
            effects.push(EffectRequest::Hit {
                x: player.pos.x,
                y: player.pos.y,
            });
            removed_bullets.push(shot.entity);
        }
    }

    // 3. Apply removals.
    for entity in removed_bullets {
        let _ = world.despawn(entity);
    }
    let mut survivors = Vec::with_capacity(enemies.len());
    for (index, enemy) in enemies.into_iter().enumerate() {
        if removed_enemies.contains(&index) {
            let _ = world.despawn(enemy.entity);
        } else {
            survivors.push(enemy);
        }
    }

    // 4. Barrier grinding and hull contact.
    let barrier_radius = player
        .active_skill(SkillKind::Barrier)
        .and_then(|skill| skill.barrier_radius());
    for enemy in &mut survivors {
        let distance = player.pos.distance(enemy.pos);
        match barrier_radius {
            Some(radius) if distance < radius => {
                let push = direction(angle_between(player.pos, enemy.pos)) * BARRIER_PUSH;
                enemy.pos += push;
                effects.push(EffectRequest::Hit {
                    x: enemy.pos.x,
                    y: enemy.pos.y,
                });
                enemy.hp -= player.damage * BARRIER_DAMAGE_FACTOR;
                if enemy.hp <= 0.0 {
                    record_kill(state, enemy, events, effects, &mut drops);
                }
            }
            _ => {
                if !player.is_invulnerable() && distance < player.size + enemy.size {
                    outcome.player_died |= damage_player(player, events);
                    effects.push(EffectRequest::Hit {
                        x: player.pos.x,
                        y: player.pos.y,
                    });
                }
            }
        }
    }
    for enemy in survivors {
        if enemy.hp <= 0.0 {
            let _ = world.despawn(enemy.entity);
            continue;
        }
        if let Ok((pos, record)) = world.query_one_mut::<(&mut Position, &mut Enemy)>(enemy.entity)
        {
            pos.0 = enemy.pos;
            record.hp = enemy.hp;
        }
    }

    for (at, value) in drops {
        world_setup::drop_exp(world, rng, at, value);
    }

    // 5. Experience orbs.
    let mut collected: Vec<Entity> = Vec::new();
    for (entity, (pos, orb)) in world.query_mut::<(&mut Position, &mut ExpOrb)>() {
        let distance = player.pos.distance(pos.0);
        if distance < orb.magnet_radius {
            pos.0 += (player.pos - pos.0) * ORB_PULL_FACTOR;
            if distance < player.size + orb.size {
                state.exp += orb.value;
                outcome
                    .levels_reached
                    .extend(progression::check_level_up(state, player, scheduler, now));
                collected.push(entity);
                continue;
            }
        }
        orb.life = orb.life.saturating_sub(1);
        if orb.life == 0 {
            collected.push(entity);
        }
    }
    for entity in collected {
        let _ = world.despawn(entity);
    }

    outcome
}

fn record_kill(
    state: &mut GameState,
    enemy: &EnemyState,
    events: &mut Vec<GameEvent>,
    effects: &mut Vec<EffectRequest>,
    drops: &mut Vec<(Vec2, u64)>,
) {
    state.score += enemy.value;
    if enemy.kind == EnemyKind::Blue {
        state.blue_alive = state.blue_alive.saturating_sub(1);
    }
    effects.push(EffectRequest::Explosion {
        x: enemy.pos.x,
        y: enemy.pos.y,
    });
    drops.push((enemy.pos, enemy.value));
    events.push(GameEvent::EnemyKilled {
        kind: enemy.kind,
        value: enemy.value,
    });
}

/// Take one life and start the hit invulnerability window. Returns `true`
/// when that was the last life.
pub fn damage_player(player: &mut Player, events: &mut Vec<GameEvent>) -> bool {
    player.lives = player.lives.saturating_sub(1);
    player.invulnerable = HIT_INVULNERABILITY_TICKS;
    events.push(GameEvent::PlayerHit {
        lives_left: player.lives,
    });
    player.lives == 0
}
