//! Skill data model and catalog.
//!
//! A `Skill` is an owned instance sitting in one of the player's slots.
//! Kind-specific state lives in `SkillParams`, so each variant carries only
//! the fields it needs. Activation, scaling and timing rules live in the
//! engine's skill system, not here.

use serde::{Deserialize, Serialize};

use crate::enums::SkillCategory;
use crate::types::WallClockMs;

/// Maximum level reachable by a basic skill.
pub const BASIC_MAX_LEVEL: u32 = 6;
/// Level at which a basic skill is acquired.
pub const BASIC_START_LEVEL: u32 = 1;
/// Level at which an ultimate is acquired.
pub const ULTIMATE_START_LEVEL: u32 = 10;

/// Skill identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillKind {
    SpreadShot,
    GiantShot,
    RapidFire,
    Dash,
    Barrier,
    Invincible,
    Ricochet,
    Homing,
}

/// Kind-specific skill state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SkillParams {
    SpreadShot { bullet_count: u32 },
    GiantShot { size_multiplier: f32, damage_multiplier: f32 },
    RapidFire { fire_rate_multiplier: f32 },
    Dash { charges: u32, max_charges: u32 },
    Barrier { radius: f32 },
    Invincible,
    Ricochet,
    Homing,
}

/// A skill instance owned by a player slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub level: u32,
    /// `None` for charge-based skills, which never become `active`.
    pub base_duration_ms: Option<u64>,
    pub duration_ms: Option<u64>,
    pub base_cooldown_ms: u64,
    pub cooldown_ms: u64,
    pub active: bool,
    /// `None` until first use.
    pub last_used: Option<WallClockMs>,
    pub activated_at: WallClockMs,
    /// Active time already elapsed when a level-up choice paused the world.
    pub paused_elapsed: Option<u64>,
    /// Bumped on every activation so stale expiry events can be recognised.
    pub activation: u64,
    pub params: SkillParams,
}

/// Upgrade bonuses an ultimate receives at player levels 20 and 30.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UltimateBonus {
    pub duration_at_20_ms: u64,
    pub cooldown_at_30_ms: u64,
}

impl SkillKind {
    pub const BASIC: [SkillKind; 5] = [
        SkillKind::SpreadShot,
        SkillKind::GiantShot,
        SkillKind::RapidFire,
        SkillKind::Dash,
        SkillKind::Barrier,
    ];
    pub const ULTIMATE: [SkillKind; 3] =
        [SkillKind::Invincible, SkillKind::Ricochet, SkillKind::Homing];

    pub fn category(self) -> SkillCategory {
        match self {
            SkillKind::Invincible | SkillKind::Ricochet | SkillKind::Homing => {
                SkillCategory::Ultimate
            }
            _ => SkillCategory::Basic,
        }
    }

    pub fn is_ultimate(self) -> bool {
        self.category() == SkillCategory::Ultimate
    }

    pub fn name(self) -> &'static str {
        match self {
            SkillKind::SpreadShot => "Spread Shot",
            SkillKind::GiantShot => "Giant Shot",
            SkillKind::RapidFire => "Rapid Fire",
            SkillKind::Dash => "Dash",
            SkillKind::Barrier => "EM Barrier",
            SkillKind::Invincible => "Invincibility",
            SkillKind::Ricochet => "Ricochet",
            SkillKind::Homing => "Homing",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            SkillKind::SpreadShot => "⚡",
            SkillKind::GiantShot => "⬤",
            SkillKind::RapidFire => "🔥",
            SkillKind::Dash => "→",
            SkillKind::Barrier => "◯",
            SkillKind::Invincible => "🛡️",
            SkillKind::Ricochet => "↗",
            SkillKind::Homing => "🎯",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SkillKind::SpreadShot => "Fire bullets in a fan pattern",
            SkillKind::GiantShot => "Triple bullet size & double damage",
            SkillKind::RapidFire => "Double fire rate",
            SkillKind::Dash => "Quick dash movement",
            SkillKind::Barrier => "Generate protective barrier",
            SkillKind::Invincible => "Become invulnerable",
            SkillKind::Ricochet => "Bullets bounce 3 times",
            SkillKind::Homing => "All bullets home in on enemies",
        }
    }

    /// One-time special upgrade granted at level 5.
    pub fn level5_bonus(self) -> Option<&'static str> {
        match self {
            SkillKind::SpreadShot => Some("Bullets increased from 3 to 5"),
            SkillKind::GiantShot => Some("Bullet size x4 & damage x3"),
            SkillKind::RapidFire => Some("Fire rate x3 instead of x2"),
            SkillKind::Dash => Some("2 charge stacks"),
            SkillKind::Barrier => Some("Range x1.5"),
            _ => None,
        }
    }

    /// Base (duration, cooldown) in milliseconds.
    pub fn base_timing(self) -> (Option<u64>, u64) {
        match self {
            SkillKind::SpreadShot => (Some(15_000), 20_000),
            SkillKind::GiantShot => (Some(12_000), 18_000),
            SkillKind::RapidFire => (Some(8_000), 20_000),
            SkillKind::Dash => (None, 10_000),
            SkillKind::Barrier => (Some(5_000), 20_000),
            SkillKind::Invincible => (Some(10_000), 60_000),
            SkillKind::Ricochet => (Some(15_000), 60_000),
            SkillKind::Homing => (Some(12_000), 60_000),
        }
    }

    pub fn ultimate_bonus(self) -> Option<UltimateBonus> {
        let (duration_at_20_ms, cooldown_at_30_ms) = match self {
            SkillKind::Invincible => (15_000, 40_000),
            SkillKind::Ricochet => (18_000, 45_000),
            SkillKind::Homing => (20_000, 40_000),
            _ => return None,
        };
        Some(UltimateBonus {
            duration_at_20_ms,
            cooldown_at_30_ms,
        })
    }

    pub fn max_level(self) -> Option<u32> {
        match self.category() {
            SkillCategory::Basic => Some(BASIC_MAX_LEVEL),
            SkillCategory::Ultimate => None,
        }
    }

    fn initial_params(self) -> SkillParams {
        match self {
            SkillKind::SpreadShot => SkillParams::SpreadShot { bullet_count: 3 },
            SkillKind::GiantShot => SkillParams::GiantShot {
                size_multiplier: 3.0,
                damage_multiplier: 2.0,
            },
            SkillKind::RapidFire => SkillParams::RapidFire {
                fire_rate_multiplier: 2.0,
            },
            SkillKind::Dash => SkillParams::Dash {
                charges: 1,
                max_charges: 1,
            },
            SkillKind::Barrier => SkillParams::Barrier { radius: 50.0 },
            SkillKind::Invincible => SkillParams::Invincible,
            SkillKind::Ricochet => SkillParams::Ricochet,
            SkillKind::Homing => SkillParams::Homing,
        }
    }

    /// Fresh instance at the acquisition level.
    pub fn instantiate(self) -> Skill {
        let (base_duration_ms, base_cooldown_ms) = self.base_timing();
        let level = match self.category() {
            SkillCategory::Basic => BASIC_START_LEVEL,
            SkillCategory::Ultimate => ULTIMATE_START_LEVEL,
        };
        Skill {
            level,
            base_duration_ms,
            duration_ms: base_duration_ms,
            base_cooldown_ms,
            cooldown_ms: base_cooldown_ms,
            active: false,
            last_used: None,
            activated_at: 0,
            paused_elapsed: None,
            activation: 0,
            params: self.initial_params(),
        }
    }
}

impl SkillParams {
    pub fn kind(&self) -> SkillKind {
        match self {
            SkillParams::SpreadShot { .. } => SkillKind::SpreadShot,
            SkillParams::GiantShot { .. } => SkillKind::GiantShot,
            SkillParams::RapidFire { .. } => SkillKind::RapidFire,
            SkillParams::Dash { .. } => SkillKind::Dash,
            SkillParams::Barrier { .. } => SkillKind::Barrier,
            SkillParams::Invincible => SkillKind::Invincible,
            SkillParams::Ricochet => SkillKind::Ricochet,
            SkillParams::Homing => SkillKind::Homing,
        }
    }
}

impl Skill {
    pub fn kind(&self) -> SkillKind {
        self.params.kind()
    }

    pub fn category(&self) -> SkillCategory {
        self.kind().category()
    }

    /// Whether another level-up can be offered for this skill.
    pub fn can_level_up(&self) -> bool {
        self.kind()
            .max_level()
            .is_some_and(|max| self.level < max)
    }

    /// `(charges, max_charges)` for charge-based skills.
    pub fn charges(&self) -> Option<(u32, u32)> {
        match self.params {
            SkillParams::Dash {
                charges,
                max_charges,
            } => Some((charges, max_charges)),
            _ => None,
        }
    }

    /// Barrier radius while this is a barrier skill.
    pub fn barrier_radius(&self) -> Option<f32> {
        match self.params {
            SkillParams::Barrier { radius } => Some(radius),
            _ => None,
        }
    }
}
