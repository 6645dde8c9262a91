//! Upgrade options offered on level-up.

use serde::{Deserialize, Serialize};

use crate::constants::MAX_STAT_STACKS;
use crate::enums::{SlotKey, StatKind};
use crate::skills::SkillKind;

/// A single selectable upgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UpgradeOption {
    /// Acquire a skill not yet owned (basic into Q/W/E, ultimate into R).
    NewSkill { kind: SkillKind },
    /// Level up a held skill.
    LevelUpSkill {
        slot: SlotKey,
        kind: SkillKind,
        next_level: u32,
    },
    /// +10% to a base stat.
    Stat { stat: StatKind, next_stack: u32 },
    /// Restore one life.
    Heal,
}

/// An upgrade choice presented to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeOffer {
    /// Player level that produced this offer.
    pub level: u32,
    pub options: Vec<UpgradeOption>,
}

impl UpgradeOption {
    pub fn title(&self) -> String {
        match self {
            UpgradeOption::NewSkill { kind } | UpgradeOption::LevelUpSkill { kind, .. } => {
                kind.name().to_string()
            }
            UpgradeOption::Stat { stat, .. } => stat.label().to_string(),
            UpgradeOption::Heal => "Heal".to_string(),
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            UpgradeOption::NewSkill { kind } | UpgradeOption::LevelUpSkill { kind, .. } => {
                kind.icon()
            }
            UpgradeOption::Stat { stat, .. } => stat.icon(),
            UpgradeOption::Heal => "❤️",
        }
    }

    pub fn is_ultimate(&self) -> bool {
        matches!(self, UpgradeOption::NewSkill { kind } if kind.is_ultimate())
    }

    pub fn description(&self) -> String {
        match self {
            UpgradeOption::NewSkill { kind } => kind.description().to_string(),
            UpgradeOption::LevelUpSkill {
                kind, next_level, ..
            } => {
                let mut text = format!("Level {next_level}: {}", kind.description());
                match next_level {
                    2 | 4 => text.push_str(" (Duration +20%)"),
                    3 | 6 => text.push_str(" (Cooldown -20%)"),
                    5 => {
                        if let Some(bonus) = kind.level5_bonus() {
                            text.push_str(&format!(" ({bonus})"));
                        }
                    }
                    _ => {}
                }
                text
            }
            UpgradeOption::Stat { stat, next_stack } => format!(
                "Increase base {} by 10% (Lv {next_stack}/{MAX_STAT_STACKS})",
                stat.noun()
            ),
            UpgradeOption::Heal => "Restore 1 life".to_string(),
        }
    }
}
