//! Entity data: ECS components for bullets, enemies, particles and orbs,
//! plus the player, which lives outside the ECS world.
//!
//! Components are plain data structs with no gameplay logic.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::*;
use crate::skills::{Skill, SkillKind};

/// Projectile fired by the player or a blue enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub owner: BulletOwner,
    pub damage: f32,
    pub size: f32,
    /// Survives enemy hits.
    pub pierce: bool,
    pub is_laser: bool,
    pub homing: bool,
    pub ricochet: bool,
    /// Remaining ricochet bounces. Negative means exhausted.
    pub bounces: i32,
    pub color: u32,
}

/// Recent positions for trail rendering (oldest first, at most `TRAIL_LENGTH`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trail {
    pub points: VecDeque<Vec2>,
}

impl Trail {
    pub fn record(&mut self, point: Vec2) {
        self.points.push_back(point);
        while self.points.len() > TRAIL_LENGTH {
            self.points.pop_front();
        }
    }
}

/// Per-kind movement state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyBehavior {
    /// Straight drift, bouncing off the side walls.
    Drift,
    /// Sinusoidal sideways motion driven by a phase accumulator.
    Zigzag { phase: f32 },
    /// Rectangular patrol with a periodic aimed shot.
    Patrol {
        direction: PatrolDirection,
        shoot_cooldown: u32,
    },
}

/// Hostile entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub hp: f32,
    pub max_hp: f32,
    pub size: f32,
    pub color: u32,
    /// Score awarded on kill; also the experience dropped.
    pub value: u64,
    pub behavior: EnemyBehavior,
}

impl Enemy {
    pub fn is_dead(&self) -> bool {
        self.hp <= 0.0
    }
}

/// Cosmetic particle. Never read by gameplay code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub kind: ParticleKind,
    pub size: f32,
    /// Remaining frames.
    pub life: u32,
    pub color: u32,
}

/// Experience pickup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpOrb {
    pub value: u64,
    pub size: f32,
    /// Remaining frames.
    pub life: u32,
    pub magnet_radius: f32,
}

/// Permanent upgrade counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatUpgrades {
    pub speed: u32,
    pub damage: u32,
    pub fire_rate: u32,
    pub heals: u32,
}

impl StatUpgrades {
    pub fn stacks(&self, stat: StatKind) -> u32 {
        match stat {
            StatKind::Speed => self.speed,
            StatKind::Damage => self.damage,
            StatKind::FireRate => self.fire_rate,
        }
    }

    pub fn stacks_mut(&mut self, stat: StatKind) -> &mut u32 {
        match stat {
            StatKind::Speed => &mut self.speed,
            StatKind::Damage => &mut self.damage,
            StatKind::FireRate => &mut self.fire_rate,
        }
    }
}

/// The player ship. Owned by the engine directly rather than stored in the ECS.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: f32,
    pub lives: u32,
    pub max_lives: u32,
    /// Remaining invulnerability frames.
    pub invulnerable: u32,
    pub speed: f32,
    pub damage: f32,
    /// Shots per second.
    pub fire_rate: f32,
    pub upgrades: StatUpgrades,
    /// Q, W, E, R. R only ever holds an ultimate.
    pub slots: [Option<Skill>; 4],
    pub basic_skill_count: u32,
    /// Cursor the ship seeks toward.
    pub cursor: Vec2,
}

impl Player {
    pub fn new(field_width: f32, field_height: f32) -> Self {
        let pos = Vec2::new(field_width / 2.0, field_height - PLAYER_SPAWN_BOTTOM_OFFSET);
        Self {
            pos,
            size: PLAYER_SIZE,
            lives: PLAYER_MAX_LIVES,
            max_lives: PLAYER_MAX_LIVES,
            invulnerable: 0,
            speed: PLAYER_BASE_SPEED,
            damage: PLAYER_BASE_DAMAGE,
            fire_rate: PLAYER_BASE_FIRE_RATE,
            upgrades: StatUpgrades::default(),
            slots: [None, None, None, None],
            basic_skill_count: 0,
            cursor: pos,
        }
    }

    pub fn slot(&self, key: SlotKey) -> Option<&Skill> {
        self.slots[key.index()].as_ref()
    }

    pub fn slot_mut(&mut self, key: SlotKey) -> Option<&mut Skill> {
        self.slots[key.index()].as_mut()
    }

    /// Skills currently held, with their slot.
    pub fn skills(&self) -> impl Iterator<Item = (SlotKey, &Skill)> {
        SlotKey::ALL
            .into_iter()
            .filter_map(|key| self.slot(key).map(|skill| (key, skill)))
    }

    pub fn find_skill(&self, kind: SkillKind) -> Option<(SlotKey, &Skill)> {
        self.skills().find(|(_, skill)| skill.kind() == kind)
    }

    pub fn owns(&self, kind: SkillKind) -> bool {
        self.find_skill(kind).is_some()
    }

    /// Held skill of this kind, if it is currently active.
    pub fn active_skill(&self, kind: SkillKind) -> Option<&Skill> {
        self.find_skill(kind)
            .map(|(_, skill)| skill)
            .filter(|skill| skill.active)
    }

    pub fn is_skill_active(&self, kind: SkillKind) -> bool {
        self.active_skill(kind).is_some()
    }

    /// True while either the invincibility ultimate or hit frames protect the player.
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable > 0 || self.is_skill_active(SkillKind::Invincible)
    }

    fn stat_multiplier(&self, stat: StatKind) -> f32 {
        1.0 + self.upgrades.stacks(stat) as f32 * STAT_UPGRADE_STEP
    }

    pub fn effective_speed(&self) -> f32 {
        self.speed * self.stat_multiplier(StatKind::Speed)
    }

    pub fn effective_damage(&self) -> f32 {
        self.damage * self.stat_multiplier(StatKind::Damage)
    }

    /// Shots per second including upgrades (skill multipliers not applied).
    pub fn effective_fire_rate(&self) -> f32 {
        self.fire_rate * self.stat_multiplier(StatKind::FireRate)
    }
}
