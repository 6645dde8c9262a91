//! Run-level bookkeeping that lives outside the ECS world.

use ascension_core::constants::BASE_EXP_NEEDED;
use ascension_core::types::WallClockMs;

/// Score, experience and spawn-pacing state for the current run.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub score: u64,
    pub level: u32,
    pub exp: u64,
    pub exp_needed: u64,
    /// Halved wave sizes are in effect until this deadline.
    pub spawn_reduction_until: Option<WallClockMs>,
    pub first_blue_spawned: bool,
    pub last_blue_spawn_ms: WallClockMs,
    /// Blue enemies currently alive.
    pub blue_alive: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            score: 0,
            level: 1,
            exp: 0,
            exp_needed: BASE_EXP_NEEDED as u64,
            spawn_reduction_until: None,
            first_blue_spawned: false,
            last_blue_spawn_ms: 0,
            blue_alive: 0,
        }
    }
}

impl GameState {
    pub fn spawn_reduction(&self) -> bool {
        self.spawn_reduction_until.is_some()
    }
}
