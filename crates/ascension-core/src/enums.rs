//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    MainMenu,
    /// World advancing every tick.
    Playing,
    /// World paused while the player picks an upgrade.
    ChoosingUpgrade,
    /// Player destroyed; the game-over callback is pending.
    DeathAnimation,
    GameOver,
}

/// Ability slot bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SlotKey {
    Q,
    W,
    E,
    R,
}

impl SlotKey {
    pub const ALL: [SlotKey; 4] = [SlotKey::Q, SlotKey::W, SlotKey::E, SlotKey::R];
    /// Slots that accept basic skills, in fill order.
    pub const BASIC: [SlotKey; 3] = [SlotKey::Q, SlotKey::W, SlotKey::E];

    /// Parse a key name case-insensitively. Anything other than q/w/e/r is `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_uppercase().as_str() {
            "Q" => Some(SlotKey::Q),
            "W" => Some(SlotKey::W),
            "E" => Some(SlotKey::E),
            "R" => Some(SlotKey::R),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        match self {
            SlotKey::Q => 0,
            SlotKey::W => 1,
            SlotKey::E => 2,
            SlotKey::R => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SlotKey::Q => "Q",
            SlotKey::W => "W",
            SlotKey::E => "E",
            SlotKey::R => "R",
        }
    }
}

/// Skill category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillCategory {
    Basic,
    Ultimate,
}

/// Enemy kind. Red and orange variants share `Normal` and differ only in spawn profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Normal,
    Zigzag,
    Blue,
}

/// Spawn archetype. Zigzag is a motion modifier applied on top of red or orange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyArchetype {
    /// Fast, weak.
    Red,
    /// Slow, tanky.
    Orange,
    /// Patrolling elite with an aimed shot.
    Blue,
}

/// Heading along the blue enemy's patrol rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatrolDirection {
    Right,
    Down,
    Left,
    Up,
}

/// Who fired a bullet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOwner {
    Player,
    Enemy,
}

/// Visual tag for particles. Cosmetic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    Hit,
    Explosion,
    Dash,
    Spark,
    Death,
    Barrier,
}

/// Permanent stat upgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    Speed,
    Damage,
    FireRate,
}

impl StatKind {
    pub const ALL: [StatKind; 3] = [StatKind::Speed, StatKind::Damage, StatKind::FireRate];

    pub fn label(self) -> &'static str {
        match self {
            StatKind::Speed => "Speed Boost",
            StatKind::Damage => "Damage Boost",
            StatKind::FireRate => "Fire Rate Boost",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            StatKind::Speed => "👟",
            StatKind::Damage => "⚔️",
            StatKind::FireRate => "🔫",
        }
    }

    pub fn noun(self) -> &'static str {
        match self {
            StatKind::Speed => "speed",
            StatKind::Damage => "damage",
            StatKind::FireRate => "fire rate",
        }
    }
}

/// Whether spawn events keep firing while a level-up choice pauses the world.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnPausePolicy {
    /// Spawns keep landing on wall-clock time; spawned enemies wait, frozen, until resume.
    #[default]
    KeepRunning,
    /// Spawn events are held and their deadlines shifted by the pause length.
    Freeze,
}

/// Status of a skill slot for the HUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotStatus {
    Empty,
    Ready,
    Active,
    Cooldown,
}
