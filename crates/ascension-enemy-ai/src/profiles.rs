//! Archetype-specific spawn profiles.
//!
//! Consolidates per-archetype parameters for the wave scheduler, plus the
//! level-scaled HP rule and the spawn rolls.

use rand::Rng;

use ascension_core::constants::*;
use ascension_core::enums::EnemyArchetype;

/// Spawn parameters for an enemy archetype.
pub struct EnemySpawnProfile {
    /// HP before level scaling.
    pub base_hp: f64,
    /// Horizontal speed is drawn from `±horizontal_spread / 2`.
    pub horizontal_spread: f32,
    /// Vertical speed is `[1, 3) × vertical_factor`.
    pub vertical_factor: f32,
    pub size: f32,
    pub color: u32,
}

/// Result of the per-enemy spawn roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnRoll {
    /// Red or orange; decides HP and speed.
    pub archetype: EnemyArchetype,
    /// Swap drift motion for the sinusoidal zigzag.
    pub zigzag: bool,
}

pub const RED_COLOR: u32 = 0xff3333;
pub const ORANGE_COLOR: u32 = 0xff9933;
pub const ZIGZAG_COLOR: u32 = 0xffff33;
pub const BLUE_COLOR: u32 = 0x3333ff;

/// Get the spawn profile for a given archetype.
pub fn get_profile(archetype: EnemyArchetype) -> EnemySpawnProfile {
    match archetype {
        EnemyArchetype::Red => EnemySpawnProfile {
            base_hp: 15.0,
            horizontal_spread: 3.0,
            vertical_factor: 1.5,
            size: ENEMY_SIZE,
            color: RED_COLOR,
        },
        EnemyArchetype::Orange => EnemySpawnProfile {
            base_hp: 40.0,
            horizontal_spread: 1.5,
            vertical_factor: 0.7,
            size: ENEMY_SIZE,
            color: ORANGE_COLOR,
        },
        EnemyArchetype::Blue => EnemySpawnProfile {
            base_hp: BLUE_BASE_HP,
            horizontal_spread: 0.0,
            vertical_factor: 0.0,
            size: BLUE_SIZE,
            color: BLUE_COLOR,
        },
    }
}

/// Fractional HP bonus for a player level, capped at +200%.
pub fn level_hp_bonus(level: u32) -> f64 {
    (f64::from(level.saturating_sub(1)) * HP_BONUS_PER_LEVEL).min(MAX_HP_BONUS)
}

/// `floor(base_hp × (1 + bonus))`.
pub fn scaled_hp(base_hp: f64, level: u32) -> f64 {
    (base_hp * (1.0 + level_hp_bonus(level))).floor()
}

/// Score value of a regular enemy at the given level.
pub fn normal_value(level: u32) -> u64 {
    10 + 5 * u64::from(level)
}

/// Score value of a blue enemy at the given level.
pub fn blue_value(level: u32) -> u64 {
    50 + 10 * u64::from(level)
}

/// Roll the archetype and motion modifier for one regular spawn.
pub fn roll_spawn<R: Rng + ?Sized>(rng: &mut R, level: u32) -> SpawnRoll {
    let zigzag = level >= ZIGZAG_MIN_LEVEL && rng.gen_bool(ZIGZAG_CHANCE);
    let archetype = if rng.gen_bool(0.5) {
        EnemyArchetype::Red
    } else {
        EnemyArchetype::Orange
    };
    SpawnRoll { archetype, zigzag }
}

/// Initial `(vx, vy)` for a regular spawn.
pub fn roll_velocity<R: Rng + ?Sized>(rng: &mut R, profile: &EnemySpawnProfile) -> (f32, f32) {
    let vx = (rng.gen::<f32>() - 0.5) * profile.horizontal_spread;
    let vy = (rng.gen::<f32>() * 2.0 + 1.0) * profile.vertical_factor;
    (vx, vy)
}
