//! Skill system: activation, level scaling, expiry, pause/resume and dash
//! charge regeneration.
//!
//! Skills are driven by wall-clock milliseconds. This is the only system that
//! compares skill timestamps; everything else reads the `active` flag or the
//! kind-specific parameters.

use tracing::{debug, trace};

use ascension_core::components::Player;
use ascension_core::constants::{DASH_DISTANCE, DASH_INVULNERABILITY_TICKS};
use ascension_core::enums::SlotKey;
use ascension_core::events::{EffectRequest, GameEvent};
use ascension_core::skills::{Skill, SkillKind, SkillParams};
use ascension_core::types::{unit_fraction, WallClockMs};

use crate::scheduler::{EventQueue, ScheduledEvent};

/// Immediate effect run when a skill fires.
type ActivationEffect = fn(&mut Player, &mut Vec<EffectRequest>);

/// Kind → activation effect. Duration skills that only toggle `active` map to
/// `passive`; the bullet, player and collision systems read the flag.
fn activation_effect(kind: SkillKind) -> ActivationEffect {
    match kind {
        SkillKind::Dash => dash,
        SkillKind::SpreadShot
        | SkillKind::GiantShot
        | SkillKind::RapidFire
        | SkillKind::Barrier
        | SkillKind::Invincible
        | SkillKind::Ricochet
        | SkillKind::Homing => passive,
    }
}

fn passive(_player: &mut Player, _effects: &mut Vec<EffectRequest>) {}

/// Hop up to `DASH_DISTANCE` toward the cursor.
fn dash(player: &mut Player, effects: &mut Vec<EffectRequest>) {
    let delta = player.cursor - player.pos;
    let distance = delta.length();
    if distance <= 0.0 {
        return;
    }
    let ratio = (DASH_DISTANCE / distance).min(1.0);
    player.pos += delta * ratio;
    player.invulnerable = player.invulnerable.max(DASH_INVULNERABILITY_TICKS);
    effects.push(EffectRequest::Dash {
        x: player.pos.x,
        y: player.pos.y,
    });
}

/// Whether the cooldown since the last use has elapsed. Never-used skills are ready.
pub fn cooldown_elapsed(skill: &Skill, now: WallClockMs) -> bool {
    skill
        .last_used
        .map_or(true, |last| now.saturating_sub(last) >= skill.cooldown_ms)
}

/// Activate the skill in `slot`. Returns `true` if it fired.
///
/// Empty slots, empty dash charges and skills still on cooldown are ignored.
pub fn activate(
    player: &mut Player,
    slot: SlotKey,
    now: WallClockMs,
    scheduler: &mut EventQueue,
    events: &mut Vec<GameEvent>,
    effects: &mut Vec<EffectRequest>,
) -> bool {
    let Some(skill) = player.slot_mut(slot) else {
        trace!(slot = slot.as_str(), "activation ignored: empty slot");
        return false;
    };
    let kind = skill.kind();

    if let SkillParams::Dash { charges, .. } = &mut skill.params {
        if *charges == 0 {
            trace!(slot = slot.as_str(), "dash ignored: no charges");
            return false;
        }
        *charges -= 1;
        if *charges == 0 {
            skill.last_used = Some(now);
        }
    } else {
        if !cooldown_elapsed(skill, now) {
            trace!(slot = slot.as_str(), ?kind, "activation ignored: cooling down");
            return false;
        }
        skill.last_used = Some(now);
        skill.activated_at = now;
        skill.paused_elapsed = None;
        skill.activation += 1;
        if let Some(duration) = skill.duration_ms {
            skill.active = true;
            scheduler.schedule(
                now.saturating_add(duration),
                ScheduledEvent::ExpireSkill {
                    slot,
                    activation: skill.activation,
                },
            );
        }
    }

    activation_effect(kind)(player, effects);
    debug!(slot = slot.as_str(), ?kind, "skill activated");
    events.push(GameEvent::SkillActivated { slot, kind });
    true
}

/// Handle a due expiry event. Stale activations are dropped; an expiry that
/// fires early because `activated_at` moved across a pause is rescheduled.
pub fn expire(
    player: &mut Player,
    slot: SlotKey,
    activation: u64,
    now: WallClockMs,
    scheduler: &mut EventQueue,
    events: &mut Vec<GameEvent>,
) {
    let Some(skill) = player.slot_mut(slot) else {
        return;
    };
    if !skill.active || skill.activation != activation {
        return;
    }
    let Some(duration) = skill.duration_ms else {
        skill.active = false;
        return;
    };

    let elapsed = now.saturating_sub(skill.activated_at);
    if elapsed >= duration {
        skill.active = false;
        let kind = skill.kind();
        debug!(slot = slot.as_str(), ?kind, "skill expired");
        events.push(GameEvent::SkillExpired { slot, kind });
    } else {
        scheduler.schedule(
            skill.activated_at.saturating_add(duration),
            ScheduledEvent::ExpireSkill { slot, activation },
        );
    }
}

fn scale_ms(ms: u64, factor: f64) -> u64 {
    (ms as f64 * factor).round() as u64
}

/// Raise a skill by one level and apply the modifier keyed by the new level.
pub fn level_up(skill: &mut Skill) {
    skill.level += 1;
    match skill.level {
        2 => skill.duration_ms = skill.base_duration_ms.map(|d| scale_ms(d, 1.2)),
        3 => skill.cooldown_ms = scale_ms(skill.base_cooldown_ms, 0.8),
        4 => skill.duration_ms = skill.base_duration_ms.map(|d| scale_ms(d, 1.44)),
        5 => apply_level5_special(&mut skill.params),
        6 => skill.cooldown_ms = scale_ms(skill.base_cooldown_ms, 0.64),
        _ => {}
    }
}

fn apply_level5_special(params: &mut SkillParams) {
    match params {
        SkillParams::SpreadShot { bullet_count } => *bullet_count = 5,
        SkillParams::GiantShot {
            size_multiplier,
            damage_multiplier,
        } => {
            *size_multiplier = 4.0;
            *damage_multiplier = 3.0;
        }
        SkillParams::RapidFire {
            fire_rate_multiplier,
        } => *fire_rate_multiplier = 3.0,
        SkillParams::Dash {
            charges,
            max_charges,
        } => {
            *max_charges = 2;
            *charges = 2;
        }
        SkillParams::Barrier { radius } => *radius *= 1.5,
        SkillParams::Invincible | SkillParams::Ricochet | SkillParams::Homing => {}
    }
}

/// Apply an ultimate's scripted bonus when the player reaches level 20 or 30.
/// Returns `true` if anything changed.
pub fn apply_ultimate_bonus(skill: &mut Skill, player_level: u32) -> bool {
    let Some(bonus) = skill.kind().ultimate_bonus() else {
        return false;
    };
    match player_level {
        20 => {
            skill.level = 20;
            skill.duration_ms = Some(bonus.duration_at_20_ms);
        }
        30 => {
            skill.level = 30;
            skill.cooldown_ms = bonus.cooldown_at_30_ms;
        }
        _ => return false,
    }
    true
}

/// Record how long each active skill has been running.
pub fn pause_all(player: &mut Player, now: WallClockMs) {
    for skill in player.slots.iter_mut().flatten() {
        if skill.active && skill.duration_ms.is_some() {
            skill.paused_elapsed = Some(now.saturating_sub(skill.activated_at));
        }
    }
}

/// Rewrite `activated_at` so each paused skill keeps its remaining time.
pub fn resume_all(player: &mut Player, now: WallClockMs) {
    for skill in player.slots.iter_mut().flatten() {
        if let Some(elapsed) = skill.paused_elapsed.take() {
            if skill.active {
                skill.activated_at = now.saturating_sub(elapsed);
            }
        }
    }
}

/// Periodic dash reconciliation: grant one charge per pass once the cooldown
/// has elapsed, restarting the timer while still below the maximum.
pub fn recharge_dashes(player: &mut Player, now: WallClockMs, events: &mut Vec<GameEvent>) {
    for slot in SlotKey::ALL {
        let Some(skill) = player.slot_mut(slot) else {
            continue;
        };
        let ready = cooldown_elapsed(skill, now);
        if let SkillParams::Dash {
            charges,
            max_charges,
        } = &mut skill.params
        {
            if *charges < *max_charges && ready {
                *charges += 1;
                if *charges < *max_charges {
                    skill.last_used = Some(now);
                }
                events.push(GameEvent::DashRecharged {
                    slot,
                    charges: *charges,
                });
            }
        }
    }
}

/// Active time already used, honouring a pending pause.
pub fn active_elapsed(skill: &Skill, now: WallClockMs) -> u64 {
    skill
        .paused_elapsed
        .unwrap_or_else(|| now.saturating_sub(skill.activated_at))
}

/// Remaining active fraction in [0, 1].
pub fn active_remaining_fraction(skill: &Skill, now: WallClockMs) -> f64 {
    let Some(duration) = skill.duration_ms else {
        return 0.0;
    };
    1.0 - unit_fraction(active_elapsed(skill, now) as f64, duration as f64)
}

/// Remaining cooldown fraction in [0, 1]; 0 when ready.
pub fn cooldown_remaining_fraction(skill: &Skill, now: WallClockMs) -> f64 {
    match skill.last_used {
        Some(last) => {
            1.0 - unit_fraction(now.saturating_sub(last) as f64, skill.cooldown_ms as f64)
        }
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_table_compounds_from_base() {
        let mut skill = SkillKind::SpreadShot.instantiate();
        for _ in 0..5 {
            level_up(&mut skill);
        }
        assert_eq!(skill.level, 6);
        assert_eq!(skill.duration_ms, Some(21_600));
        assert_eq!(skill.cooldown_ms, 12_800);
        assert_eq!(skill.params, SkillParams::SpreadShot { bullet_count: 5 });
    }

    #[test]
    fn test_level5_specials() {
        let mut rapid = SkillKind::RapidFire.instantiate();
        let mut barrier = SkillKind::Barrier.instantiate();
        let mut giant = SkillKind::GiantShot.instantiate();
        for _ in 0..4 {
            level_up(&mut rapid);
            level_up(&mut barrier);
            level_up(&mut giant);
        }
        assert_eq!(
            rapid.params,
            SkillParams::RapidFire {
                fire_rate_multiplier: 3.0
            }
        );
        assert_eq!(barrier.barrier_radius(), Some(75.0));
        assert_eq!(
            giant.params,
            SkillParams::GiantShot {
                size_multiplier: 4.0,
                damage_multiplier: 3.0
            }
        );
    }

    #[test]
    fn test_dash_has_no_duration_after_leveling() {
        let mut skill = SkillKind::Dash.instantiate();
        for _ in 0..5 {
            level_up(&mut skill);
        }
        assert_eq!(skill.duration_ms, None);
        assert_eq!(skill.cooldown_ms, 6_400);
    }

    #[test]
    fn test_ultimate_bonus_only_at_20_and_30() {
        let mut skill = SkillKind::Ricochet.instantiate();
        assert!(!apply_ultimate_bonus(&mut skill, 21));
        assert!(apply_ultimate_bonus(&mut skill, 20));
        assert_eq!(skill.level, 20);
        assert_eq!(skill.duration_ms, Some(18_000));
        assert!(apply_ultimate_bonus(&mut skill, 30));
        assert_eq!(skill.level, 30);
        assert_eq!(skill.cooldown_ms, 45_000);
        assert_eq!(skill.duration_ms, Some(18_000));

        let mut basic = SkillKind::Barrier.instantiate();
        assert!(!apply_ultimate_bonus(&mut basic, 20));
    }

    #[test]
    fn test_dash_hop_is_capped_and_guarded() {
        let mut player = Player::new(800.0, 600.0);
        let mut effects = Vec::new();
        player.cursor = player.pos;
        dash(&mut player, &mut effects);
        assert!(effects.is_empty(), "zero-distance dash should be a no-op");
        assert!(player.pos.x.is_finite());

        let start = player.pos;
        player.cursor = start + glam::Vec2::new(300.0, 0.0);
        dash(&mut player, &mut effects);
        assert!((player.pos.x - (start.x + DASH_DISTANCE)).abs() < 1e-3);
        assert_eq!(player.invulnerable, DASH_INVULNERABILITY_TICKS);
        assert_eq!(effects.len(), 1);
    }
}
