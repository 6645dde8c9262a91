//! Wave spawning: self-rescheduling waves of staggered enemies plus the blue
//! elite schedule.

use hecs::World;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use ascension_core::constants::*;
use ascension_core::events::GameEvent;
use ascension_core::types::WallClockMs;

use crate::game_state::GameState;
use crate::scheduler::{EventQueue, ScheduledEvent};
use crate::world_setup;

/// Enemies in a wave: grows by one every two levels up to the cap, halved
/// while the post-level-up reduction is in effect.
pub fn wave_size(level: u32, reduced: bool) -> u32 {
    let base = f64::from(BASE_WAVE_SIZE);
    let grown = base + (f64::from(level.saturating_sub(1)) * WAVE_GROWTH_PER_LEVEL).floor();
    let count = grown.min(base * MAX_WAVE_FACTOR).floor() as u32;
    if reduced {
        count / 2
    } else {
        count
    }
}

/// Delay before the next wave: 2000 ms shrinking by 50 ms per level to 1000 ms.
pub fn next_wave_delay_ms(level: u32) -> u64 {
    WAVE_BASE_DELAY_MS
        - (u64::from(level) * WAVE_DELAY_STEP_MS).min(WAVE_MAX_DELAY_REDUCTION_MS)
}

/// Handle a `SpawnWave` event: maybe spawn a blue elite, queue the wave's
/// staggered enemies and reschedule the next wave.
#[allow(clippy::too_many_arguments)]
pub fn run_wave(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    state: &mut GameState,
    scheduler: &mut EventQueue,
    now: WallClockMs,
    field_width: f32,
    field_height: f32,
    events: &mut Vec<GameEvent>,
) {
    if state.first_blue_spawned
        && state.level >= BLUE_MIN_LEVEL
        && now.saturating_sub(state.last_blue_spawn_ms) >= BLUE_SPAWN_INTERVAL_MS
    {
        spawn_blue(world, rng, state, now, field_width, field_height, events);
    }

    let count = wave_size(state.level, state.spawn_reduction());
    for i in 0..count {
        scheduler.schedule_in(
            now,
            u64::from(i) * ENEMY_SPAWN_STAGGER_MS,
            ScheduledEvent::SpawnEnemy,
        );
    }
    let delay = next_wave_delay_ms(state.level);
    scheduler.schedule_in(now, delay, ScheduledEvent::SpawnWave);
    debug!(level = state.level, count, delay, "wave scheduled");
}

/// Spawn a blue elite if fewer than the maximum are alive.
pub fn spawn_blue(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    state: &mut GameState,
    now: WallClockMs,
    field_width: f32,
    field_height: f32,
    events: &mut Vec<GameEvent>,
) -> bool {
    if state.blue_alive >= BLUE_MAX_ALIVE {
        return false;
    }
    state.last_blue_spawn_ms = now;
    world_setup::spawn_blue_enemy(world, rng, state.level, field_width, field_height);
    state.blue_alive += 1;
    debug!(alive = state.blue_alive, level = state.level, "blue enemy spawned");
    events.push(GameEvent::BlueEnemySpawned {
        alive: state.blue_alive,
    });
    true
}

/// The first blue elite arrives the moment the player reaches its level.
pub fn spawn_first_blue(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    state: &mut GameState,
    now: WallClockMs,
    field_width: f32,
    field_height: f32,
    events: &mut Vec<GameEvent>,
) -> bool {
    if state.first_blue_spawned || state.blue_alive > 0 {
        return false;
    }
    state.first_blue_spawned = true;
    spawn_blue(world, rng, state, now, field_width, field_height, events)
}
