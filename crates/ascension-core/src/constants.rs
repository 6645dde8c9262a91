//! Simulation constants and tuning parameters.

// --- Timing ---

/// Nominal frame rate (Hz). Per-tick speeds below assume this rate.
pub const TICK_RATE: u32 = 60;

/// Interval between dash charge reconciliation passes (ms).
pub const DASH_RECHARGE_INTERVAL_MS: u64 = 100;

/// Delay between the killing blow on the player and the game-over callback (ms).
pub const DEATH_ANIMATION_MS: u64 = 1000;

// --- Play field ---

pub const DEFAULT_FIELD_WIDTH: f32 = 800.0;
pub const DEFAULT_FIELD_HEIGHT: f32 = 600.0;

/// Bullets further than this outside the field are removed.
pub const BULLET_OFFSCREEN_MARGIN: f32 = 50.0;

/// Non-blue enemies are removed once they pass this far below the field.
pub const ENEMY_EXIT_MARGIN: f32 = 30.0;

// --- Player ---

pub const PLAYER_SIZE: f32 = 20.0;
pub const PLAYER_MAX_LIVES: u32 = 5;
/// Distance from the bottom edge at which the player spawns.
pub const PLAYER_SPAWN_BOTTOM_OFFSET: f32 = 100.0;
pub const PLAYER_BASE_SPEED: f32 = 5.0;
pub const PLAYER_BASE_DAMAGE: f32 = 10.0;
/// Shots per second.
pub const PLAYER_BASE_FIRE_RATE: f32 = 2.5;
/// Cursor dead zone for cursor-seeking movement.
pub const PLAYER_FOLLOW_DEADZONE: f32 = 5.0;
/// Invulnerability frames granted after taking damage.
pub const HIT_INVULNERABILITY_TICKS: u32 = 60;

/// Each stat-upgrade stack adds this fraction of the base value.
pub const STAT_UPGRADE_STEP: f32 = 0.1;
pub const MAX_STAT_STACKS: u32 = 5;
pub const MAX_HEALS: u32 = 5;
pub const MAX_BASIC_SKILLS: u32 = 3;

// --- Bullets ---

pub const PLAYER_BULLET_SPEED: f32 = 10.0;
pub const PLAYER_BULLET_SIZE: f32 = 5.0;
pub const HOMING_BULLET_SPEED: f32 = 12.0;
pub const HOMING_RANGE: f32 = 200.0;
pub const HOMING_STEER: f32 = 0.8;
pub const RICOCHET_BOUNCES: i32 = 3;
pub const TRAIL_LENGTH: usize = 10;

pub const SPREAD_ANGLE: f32 = std::f32::consts::PI / 3.0;
pub const SPREAD_DAMAGE_FACTOR: f32 = 1.25;

pub const ENEMY_BULLET_SPEED: f32 = 5.0;
pub const ENEMY_BULLET_SIZE: f32 = 8.0;
pub const ENEMY_BULLET_DAMAGE: f32 = 1.0;

// --- Skills ---

pub const DASH_DISTANCE: f32 = 100.0;
pub const DASH_INVULNERABILITY_TICKS: u32 = 10;
pub const BARRIER_PUSH: f32 = 5.0;
/// Fraction of base player damage a barrier deals per tick.
pub const BARRIER_DAMAGE_FACTOR: f32 = 0.5;
/// Barrier edge particles are emitted every this many ticks.
pub const BARRIER_PARTICLE_INTERVAL: u64 = 5;

// --- Enemies / spawning ---

pub const ENEMY_SIZE: f32 = 15.0;
pub const ENEMY_SPAWN_Y: f32 = -30.0;
pub const ENEMY_SPAWN_X_MARGIN: f32 = 30.0;
pub const BASE_WAVE_SIZE: u32 = 3;
pub const WAVE_GROWTH_PER_LEVEL: f64 = 0.5;
pub const MAX_WAVE_FACTOR: f64 = 2.5;
pub const ENEMY_SPAWN_STAGGER_MS: u64 = 200;
pub const WAVE_BASE_DELAY_MS: u64 = 2000;
pub const WAVE_DELAY_STEP_MS: u64 = 50;
pub const WAVE_MAX_DELAY_REDUCTION_MS: u64 = 1000;
/// Duration of the post-level-up spawn reduction.
pub const SPAWN_REDUCTION_MS: u64 = 3000;

/// HP bonus per level above 1.
pub const HP_BONUS_PER_LEVEL: f64 = 0.15;
pub const MAX_HP_BONUS: f64 = 2.0;

pub const ZIGZAG_MIN_LEVEL: u32 = 10;
pub const ZIGZAG_CHANCE: f64 = 0.3;
pub const ZIGZAG_PHASE_STEP: f32 = 0.1;
pub const ZIGZAG_AMPLITUDE: f32 = 3.0;

pub const BLUE_MIN_LEVEL: u32 = 10;
pub const BLUE_BASE_HP: f64 = 120.0;
pub const BLUE_MAX_ALIVE: u32 = 3;
pub const BLUE_SPAWN_INTERVAL_MS: u64 = 30_000;
pub const BLUE_SIZE: f32 = ENEMY_SIZE * 1.5;
pub const BLUE_SPEED: f32 = 1.0;
pub const BLUE_PATROL_MARGIN: f32 = 50.0;
/// Distance of the patrol rectangle's bottom edge from the field bottom.
pub const BLUE_PATROL_BOTTOM_OFFSET: f32 = 100.0;
pub const BLUE_SHOOT_INTERVAL_TICKS: u32 = 60;

// --- Experience ---

pub const BASE_EXP_NEEDED: f64 = 100.0;
pub const EXP_GROWTH: f64 = 1.2;
pub const ORB_SIZE: f32 = 6.0;
pub const ORB_LIFE_TICKS: u32 = 400;
pub const ORB_MAGNET_RADIUS: f32 = 50.0;
/// Fraction of the remaining distance an orb travels toward the player each tick.
pub const ORB_PULL_FACTOR: f32 = 0.2;
pub const ORB_SCATTER: f32 = 40.0;
pub const MAX_ORBS_PER_KILL: u32 = 5;
/// Experience value covered by one orb before the drop is split.
pub const EXP_PER_ORB: f64 = 20.0;

/// Player level at which the ultimate choice is offered.
pub const ULTIMATE_UNLOCK_LEVEL: u32 = 10;
pub const UPGRADE_CHOICES: usize = 3;
