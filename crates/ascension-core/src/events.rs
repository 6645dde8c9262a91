//! Events emitted by the simulation for UI, audio and lifecycle callbacks.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::skills::SkillKind;
use crate::upgrades::UpgradeOption;

/// Gameplay events, drained into each snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A fresh run started.
    RunStarted,
    SkillActivated { slot: SlotKey, kind: SkillKind },
    SkillExpired { slot: SlotKey, kind: SkillKind },
    DashRecharged { slot: SlotKey, charges: u32 },
    EnemyKilled { kind: EnemyKind, value: u64 },
    BlueEnemySpawned { alive: u32 },
    PlayerHit { lives_left: u32 },
    LevelUp { level: u32 },
    /// The upgrade UI should show these options and answer with `ChooseUpgrade`.
    LevelUpChoicesReady { level: u32, options: Vec<UpgradeOption> },
    UpgradeApplied { option: UpgradeOption },
    /// Terminal: the run is over.
    GameOver {
        score: u64,
        level: u32,
        elapsed_ticks: u64,
    },
}

/// Cosmetic effect requested by a gameplay system. The engine turns these
/// into particles after physics resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EffectRequest {
    Hit { x: f32, y: f32 },
    Explosion { x: f32, y: f32 },
    Dash { x: f32, y: f32 },
    Ricochet { x: f32, y: f32 },
    Death { x: f32, y: f32 },
    /// A single spark on the barrier ring at `angle`.
    BarrierSpark { x: f32, y: f32, radius: f32, angle: f32 },
}
