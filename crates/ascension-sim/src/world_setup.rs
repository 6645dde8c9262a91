//! Entity spawn factories.
//!
//! Creates enemies, bullets, particles and experience orbs with the
//! appropriate component bundles.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use ascension_core::components::*;
use ascension_core::constants::*;
use ascension_core::enums::*;
use ascension_core::types::{direction, Position, Velocity};

use ascension_enemy_ai::fsm::{blue_anchors, patrol_velocity};
use ascension_enemy_ai::profiles::{self, get_profile, SpawnRoll};

pub const PLAYER_BULLET_COLOR: u32 = 0x00ffff;
pub const ORB_COLOR: u32 = 0x00ff00;

/// Spawn a red or orange enemy above the top edge, rolled for the current level.
pub fn spawn_enemy(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    level: u32,
    field_width: f32,
) -> Entity {
    let roll = profiles::roll_spawn(rng, level);
    spawn_rolled_enemy(world, rng, roll, level, field_width)
}

/// Spawn an enemy from an already-made roll.
pub fn spawn_rolled_enemy(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    roll: SpawnRoll,
    level: u32,
    field_width: f32,
) -> Entity {
    let profile = get_profile(roll.archetype);
    let hp = profiles::scaled_hp(profile.base_hp, level) as f32;

    let span = (field_width - 2.0 * ENEMY_SPAWN_X_MARGIN).max(0.0);
    let x = rng.gen::<f32>() * span + ENEMY_SPAWN_X_MARGIN;
    let (vx, vy) = profiles::roll_velocity(rng, &profile);

    let (kind, behavior, color) = if roll.zigzag {
        (
            EnemyKind::Zigzag,
            EnemyBehavior::Zigzag { phase: 0.0 },
            profiles::ZIGZAG_COLOR,
        )
    } else {
        (EnemyKind::Normal, EnemyBehavior::Drift, profile.color)
    };

    world.spawn((
        Position::new(x, ENEMY_SPAWN_Y),
        Velocity::new(vx, vy),
        Enemy {
            kind,
            hp,
            max_hp: hp,
            size: profile.size,
            color,
            value: profiles::normal_value(level),
            behavior,
        },
    ))
}

/// Spawn a blue elite at one of the four patrol anchors.
pub fn spawn_blue_enemy(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    level: u32,
    field_width: f32,
    field_height: f32,
) -> Entity {
    let anchors = blue_anchors(field_width, field_height);
    let (anchor, heading) = anchors[rng.gen_range(0..anchors.len())];
    let profile = get_profile(EnemyArchetype::Blue);
    let hp = profiles::scaled_hp(profile.base_hp, level) as f32;

    world.spawn((
        Position(anchor),
        Velocity(patrol_velocity(heading) * BLUE_SPEED),
        Enemy {
            kind: EnemyKind::Blue,
            hp,
            max_hp: hp,
            size: profile.size,
            color: profile.color,
            value: profiles::blue_value(level),
            behavior: EnemyBehavior::Patrol {
                direction: heading,
                shoot_cooldown: 0,
            },
        },
    ))
}

/// Modifiers applied to a player shot by the currently active skills.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotModifiers {
    pub size_multiplier: f32,
    pub damage_multiplier: f32,
    pub homing: bool,
    pub ricochet: bool,
}

impl Default for ShotModifiers {
    fn default() -> Self {
        Self {
            size_multiplier: 1.0,
            damage_multiplier: 1.0,
            homing: false,
            ricochet: false,
        }
    }
}

/// Spawn a player bullet travelling at `angle`.
pub fn spawn_player_bullet(
    world: &mut World,
    origin: Vec2,
    angle: f32,
    damage: f32,
    modifiers: ShotModifiers,
) -> Entity {
    world.spawn((
        Position(origin),
        Velocity(direction(angle) * PLAYER_BULLET_SPEED),
        Bullet {
            owner: BulletOwner::Player,
            damage: damage * modifiers.damage_multiplier,
            size: PLAYER_BULLET_SIZE * modifiers.size_multiplier,
            pierce: false,
            is_laser: false,
            homing: modifiers.homing,
            ricochet: modifiers.ricochet,
            bounces: if modifiers.ricochet { RICOCHET_BOUNCES } else { 0 },
            color: PLAYER_BULLET_COLOR,
        },
        Trail::default(),
    ))
}

/// Spawn a blue enemy's aimed bullet.
pub fn spawn_enemy_bullet(world: &mut World, origin: Vec2, velocity: Vec2) -> Entity {
    world.spawn((
        Position(origin),
        Velocity(velocity),
        Bullet {
            owner: BulletOwner::Enemy,
            damage: ENEMY_BULLET_DAMAGE,
            size: ENEMY_BULLET_SIZE,
            pierce: false,
            is_laser: false,
            homing: false,
            ricochet: false,
            bounces: 0,
            color: profiles::BLUE_COLOR,
        },
        Trail::default(),
    ))
}

pub fn spawn_particle(world: &mut World, origin: Vec2, velocity: Vec2, particle: Particle) -> Entity {
    world.spawn((Position(origin), Velocity(velocity), particle))
}

/// Number of orbs a kill worth `value` drops.
pub fn orb_count(value: u64) -> u64 {
    ((value as f64 / EXP_PER_ORB).ceil() as u64).clamp(1, u64::from(MAX_ORBS_PER_KILL))
}

/// Scatter experience orbs around a kill.
pub fn drop_exp(world: &mut World, rng: &mut ChaCha8Rng, at: Vec2, value: u64) {
    let count = orb_count(value);
    let per_orb = value / count;
    for _ in 0..count {
        let offset = Vec2::new(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5) * ORB_SCATTER;
        world.spawn((
            Position(at + offset),
            ExpOrb {
                value: per_orb,
                size: ORB_SIZE,
                life: ORB_LIFE_TICKS,
                magnet_radius: ORB_MAGNET_RADIUS,
            },
        ));
    }
}
