//! Snapshot system: reads the ECS world and the player and builds the
//! per-tick GameStateSnapshot handed to the renderer and UI. Never mutates.

use hecs::World;

use ascension_core::components::*;
use ascension_core::enums::*;
use ascension_core::events::GameEvent;
use ascension_core::skills::{Skill, SkillKind};
use ascension_core::state::*;
use ascension_core::types::{unit_fraction, Position, SimTime, WallClockMs};
use ascension_core::upgrades::UpgradeOffer;

use crate::game_state::GameState;
use crate::systems::skills;

/// Everything the snapshot needs besides the ECS world.
pub struct SnapshotInput<'a> {
    pub player: &'a Player,
    pub state: &'a GameState,
    pub time: &'a SimTime,
    pub phase: GamePhase,
    pub now: WallClockMs,
    pub upgrade_offer: Option<&'a UpgradeOffer>,
    pub events: Vec<GameEvent>,
}

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(world: &World, input: SnapshotInput<'_>) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *input.time,
        phase: input.phase,
        hud: build_hud(input.state, input.player, input.time),
        player: build_player(input.player, input.phase),
        skills: build_skills(input.player, input.now),
        bullets: build_bullets(world),
        enemies: build_enemies(world),
        particles: build_particles(world),
        orbs: build_orbs(world),
        upgrade_offer: input.upgrade_offer.cloned(),
        events: input.events,
    }
}

fn build_hud(state: &GameState, player: &Player, time: &SimTime) -> HudView {
    let lives = player.lives.min(player.max_lives);
    HudView {
        score: state.score,
        level: state.level,
        exp: state.exp,
        exp_needed: state.exp_needed,
        exp_fraction: unit_fraction(state.exp as f64, state.exp_needed as f64),
        elapsed: time.elapsed_label(),
        lives,
        max_lives: player.max_lives,
        hearts: (0..player.max_lives).map(|i| i < lives).collect(),
    }
}

fn build_player(player: &Player, phase: GamePhase) -> PlayerView {
    PlayerView {
        position: Position(player.pos),
        size: player.size,
        invulnerable: player.invulnerable > 0 && (player.invulnerable / 5) % 2 == 0,
        visible: !matches!(phase, GamePhase::DeathAnimation | GamePhase::GameOver),
        barrier_radius: player
            .active_skill(SkillKind::Barrier)
            .and_then(Skill::barrier_radius),
        invincible: player.is_skill_active(SkillKind::Invincible),
    }
}

/// One view per slot, Q through R.
pub fn build_skills(player: &Player, now: WallClockMs) -> Vec<SkillSlotView> {
    SlotKey::ALL
        .into_iter()
        .map(|slot| match player.slot(slot) {
            Some(skill) => skill_view(slot, skill, now),
            None => SkillSlotView {
                slot,
                kind: None,
                icon: None,
                level: 0,
                status: SlotStatus::Empty,
                progress: 0.0,
                charges: None,
            },
        })
        .collect()
}

fn skill_view(slot: SlotKey, skill: &Skill, now: WallClockMs) -> SkillSlotView {
    let charges = skill.charges();
    let (status, progress) = if let Some((count, _)) = charges {
        if count == 0 {
            (
                SlotStatus::Cooldown,
                skills::cooldown_remaining_fraction(skill, now),
            )
        } else {
            (SlotStatus::Ready, 0.0)
        }
    } else if skill.active {
        (
            SlotStatus::Active,
            skills::active_remaining_fraction(skill, now),
        )
    } else {
        let remaining = skills::cooldown_remaining_fraction(skill, now);
        if remaining > 0.0 {
            (SlotStatus::Cooldown, remaining)
        } else {
            (SlotStatus::Ready, 0.0)
        }
    };

    SkillSlotView {
        slot,
        kind: Some(skill.kind()),
        icon: Some(skill.kind().icon().to_string()),
        level: skill.level,
        status,
        progress: progress.clamp(0.0, 1.0),
        charges: charges.map(|(count, _)| count),
    }
}

fn build_bullets(world: &World) -> Vec<BulletView> {
    world
        .query::<(&Position, &Bullet, &Trail)>()
        .iter()
        .map(|(_, (pos, bullet, trail))| BulletView {
            position: *pos,
            size: bullet.size,
            color: bullet.color,
            owner: bullet.owner,
            trail: trail.points.iter().copied().map(Position).collect(),
        })
        .collect()
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    world
        .query::<(&Position, &Enemy)>()
        .iter()
        .map(|(_, (pos, enemy))| EnemyView {
            position: *pos,
            size: enemy.size,
            color: enemy.color,
            kind: enemy.kind,
            hp_fraction: unit_fraction(f64::from(enemy.hp), f64::from(enemy.max_hp)),
        })
        .collect()
}

fn build_particles(world: &World) -> Vec<ParticleView> {
    world
        .query::<(&Position, &Particle)>()
        .iter()
        .map(|(_, (pos, particle))| ParticleView {
            position: *pos,
            size: particle.size,
            color: particle.color,
            kind: particle.kind,
            life: particle.life,
        })
        .collect()
}

fn build_orbs(world: &World) -> Vec<OrbView> {
    world
        .query::<(&Position, &ExpOrb)>()
        .iter()
        .map(|(_, (pos, orb))| OrbView {
            position: *pos,
            size: orb.size,
            value: orb.value,
        })
        .collect()
}
