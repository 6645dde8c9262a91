//! Game state snapshot: the complete visible state handed to the renderer
//! and UI after each tick. Read-only; consumers never hold live handles.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::skills::SkillKind;
use crate::types::{Position, SimTime};
use crate::upgrades::UpgradeOffer;

/// Complete game state broadcast after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub hud: HudView,
    pub player: PlayerView,
    pub skills: Vec<SkillSlotView>,
    pub bullets: Vec<BulletView>,
    pub enemies: Vec<EnemyView>,
    pub particles: Vec<ParticleView>,
    pub orbs: Vec<OrbView>,
    /// Upgrade offer waiting for a `ChooseUpgrade` command.
    pub upgrade_offer: Option<UpgradeOffer>,
    pub events: Vec<GameEvent>,
}

/// Heads-up display values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HudView {
    pub score: u64,
    pub level: u32,
    pub exp: u64,
    pub exp_needed: u64,
    /// Clamped to [0, 1].
    pub exp_fraction: f64,
    /// `m:ss` at 60 fps.
    pub elapsed: String,
    pub lives: u32,
    pub max_lives: u32,
    /// One entry per heart; `true` = filled.
    pub hearts: Vec<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Position,
    pub size: f32,
    /// Blink phase while invulnerable.
    pub invulnerable: bool,
    pub visible: bool,
    pub barrier_radius: Option<f32>,
    pub invincible: bool,
}

/// Skill bar entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillSlotView {
    pub slot: SlotKey,
    pub kind: Option<SkillKind>,
    pub icon: Option<String>,
    pub level: u32,
    pub status: SlotStatus,
    /// Remaining active fraction while active, remaining cooldown fraction while
    /// cooling down, 0 otherwise. Clamped to [0, 1].
    pub progress: f64,
    pub charges: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletView {
    pub position: Position,
    pub size: f32,
    pub color: u32,
    pub owner: BulletOwner,
    pub trail: Vec<Position>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub position: Position,
    pub size: f32,
    pub color: u32,
    pub kind: EnemyKind,
    /// Clamped to [0, 1].
    pub hp_fraction: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleView {
    pub position: Position,
    pub size: f32,
    pub color: u32,
    pub kind: ParticleKind,
    pub life: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrbView {
    pub position: Position,
    pub size: f32,
    pub value: u64,
}
