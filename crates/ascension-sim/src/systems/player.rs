//! Player update: cursor-seeking movement, invulnerability countdown and
//! auto-fire.

use std::f32::consts::{FRAC_PI_2, TAU};

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use ascension_core::components::Player;
use ascension_core::constants::*;
use ascension_core::events::EffectRequest;
use ascension_core::skills::{SkillKind, SkillParams};
use ascension_core::types::SimTime;

use crate::world_setup::{self, ShotModifiers};

/// Advance the player by one tick.
pub fn run(
    world: &mut World,
    player: &mut Player,
    rng: &mut ChaCha8Rng,
    time: &SimTime,
    field_width: f32,
    field_height: f32,
    effects: &mut Vec<EffectRequest>,
) {
    move_toward_cursor(player, field_width, field_height);
    player.invulnerable = player.invulnerable.saturating_sub(1);

    if time.tick % fire_interval(player) == 0 {
        shoot(world, player);
    }

    if let Some(radius) = active_barrier_radius(player) {
        if time.tick % BARRIER_PARTICLE_INTERVAL == 0 {
            effects.push(EffectRequest::BarrierSpark {
                x: player.pos.x,
                y: player.pos.y,
                radius,
                angle: rng.gen::<f32>() * TAU,
            });
        }
    }
}

/// Seek the cursor at the upgraded speed, then clamp to the field.
pub fn move_toward_cursor(player: &mut Player, field_width: f32, field_height: f32) {
    let delta = player.cursor - player.pos;
    let distance = delta.length();
    if distance > PLAYER_FOLLOW_DEADZONE {
        player.pos += delta / distance * player.effective_speed();
    }
    let size = player.size;
    player.pos.x = player.pos.x.clamp(size, (field_width - size).max(size));
    player.pos.y = player.pos.y.clamp(size, (field_height - size).max(size));
}

/// Shots per second including upgrades and rapid fire.
pub fn current_fire_rate(player: &Player) -> f32 {
    let multiplier = match player.active_skill(SkillKind::RapidFire).map(|s| s.params) {
        Some(SkillParams::RapidFire {
            fire_rate_multiplier,
        }) => fire_rate_multiplier,
        _ => 1.0,
    };
    player.effective_fire_rate() * multiplier
}

/// Ticks between shots. Never zero.
pub fn fire_interval(player: &Player) -> u64 {
    let rate = current_fire_rate(player);
    if rate <= 0.0 || !rate.is_finite() {
        return u64::MAX;
    }
    ((TICK_RATE as f32 / rate).floor() as u64).max(1)
}

/// Modifiers contributed by giant shot, homing and ricochet.
pub fn shot_modifiers(player: &Player) -> ShotModifiers {
    let mut modifiers = ShotModifiers {
        homing: player.is_skill_active(SkillKind::Homing),
        ricochet: player.is_skill_active(SkillKind::Ricochet),
        ..Default::default()
    };
    if let Some(SkillParams::GiantShot {
        size_multiplier,
        damage_multiplier,
    }) = player.active_skill(SkillKind::GiantShot).map(|s| s.params)
    {
        modifiers.size_multiplier = size_multiplier;
        modifiers.damage_multiplier = damage_multiplier;
    }
    modifiers
}

/// Fire one volley: a fan while spread shot is active, otherwise a single
/// bullet straight up.
pub fn shoot(world: &mut World, player: &Player) {
    let damage = player.effective_damage();
    let modifiers = shot_modifiers(player);

    if let Some(SkillParams::SpreadShot { bullet_count }) =
        player.active_skill(SkillKind::SpreadShot).map(|s| s.params)
    {
        let spread_damage = damage * SPREAD_DAMAGE_FACTOR;
        for angle in spread_angles(bullet_count) {
            world_setup::spawn_player_bullet(world, player.pos, angle, spread_damage, modifiers);
        }
        return;
    }

    world_setup::spawn_player_bullet(world, player.pos, -FRAC_PI_2, damage, modifiers);
}

/// Fan angles centred straight up across `SPREAD_ANGLE`.
pub fn spread_angles(count: u32) -> Vec<f32> {
    if count <= 1 {
        return vec![-FRAC_PI_2];
    }
    let last = (count - 1) as f32;
    (0..count)
        .map(|i| -FRAC_PI_2 + SPREAD_ANGLE * (i as f32 - last / 2.0) / last)
        .collect()
}

fn active_barrier_radius(player: &Player) -> Option<f32> {
    player
        .active_skill(SkillKind::Barrier)
        .and_then(|skill| skill.barrier_radius())
}
