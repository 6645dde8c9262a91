//! Enemy behaviour state machines.
//!
//! Pure functions that advance one enemy by one tick based on its behaviour
//! state: drift with wall bounce, zigzag, or the blue enemy's rectangular
//! patrol with a periodic aimed shot. No ECS dependency; operates on plain data.

use glam::Vec2;

use ascension_core::components::EnemyBehavior;
use ascension_core::constants::*;
use ascension_core::enums::PatrolDirection;
use ascension_core::types::{angle_between, direction};

/// Input to the FSM for a single enemy.
pub struct EnemyContext {
    pub behavior: EnemyBehavior,
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    pub field_width: f32,
    pub field_height: f32,
    /// Where aimed shots go.
    pub player_position: Vec2,
}

/// Output from the FSM.
pub struct EnemyUpdate {
    pub behavior: EnemyBehavior,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Velocity of a bullet fired this tick, if any.
    pub shot: Option<Vec2>,
}

/// Evaluate the FSM for one enemy.
pub fn evaluate(ctx: &EnemyContext) -> EnemyUpdate {
    match ctx.behavior {
        EnemyBehavior::Drift => evaluate_drift(ctx),
        EnemyBehavior::Zigzag { phase } => evaluate_zigzag(ctx, phase),
        EnemyBehavior::Patrol {
            direction,
            shoot_cooldown,
        } => evaluate_patrol(ctx, direction, shoot_cooldown),
    }
}

fn evaluate_drift(ctx: &EnemyContext) -> EnemyUpdate {
    let position = ctx.position + ctx.velocity;
    let mut velocity = ctx.velocity;
    if position.x < ctx.size || position.x > ctx.field_width - ctx.size {
        velocity.x = -velocity.x;
    }
    EnemyUpdate {
        behavior: ctx.behavior,
        position,
        velocity,
        shot: None,
    }
}

fn evaluate_zigzag(ctx: &EnemyContext, phase: f32) -> EnemyUpdate {
    let phase = phase + ZIGZAG_PHASE_STEP;
    let position = Vec2::new(
        ctx.position.x + phase.sin() * ZIGZAG_AMPLITUDE,
        ctx.position.y + ctx.velocity.y,
    );
    EnemyUpdate {
        behavior: EnemyBehavior::Zigzag { phase },
        position,
        velocity: ctx.velocity,
        shot: None,
    }
}

fn evaluate_patrol(
    ctx: &EnemyContext,
    heading: PatrolDirection,
    shoot_cooldown: u32,
) -> EnemyUpdate {
    let (position, heading) = advance_patrol(
        ctx.position,
        heading,
        ctx.field_width,
        ctx.field_height,
    );

    let mut shoot_cooldown = shoot_cooldown + 1;
    let shot = if shoot_cooldown >= BLUE_SHOOT_INTERVAL_TICKS {
        shoot_cooldown = 0;
        Some(aimed_shot(position, ctx.player_position))
    } else {
        None
    };

    EnemyUpdate {
        behavior: EnemyBehavior::Patrol {
            direction: heading,
            shoot_cooldown,
        },
        position,
        velocity: patrol_velocity(heading),
        shot,
    }
}

/// Move one step along the patrol rectangle, turning clockwise at each corner.
pub fn advance_patrol(
    position: Vec2,
    heading: PatrolDirection,
    field_width: f32,
    field_height: f32,
) -> (Vec2, PatrolDirection) {
    let margin = BLUE_PATROL_MARGIN;
    let right = field_width - margin;
    let bottom = field_height - BLUE_PATROL_BOTTOM_OFFSET;

    let mut pos = position + patrol_velocity(heading) * BLUE_SPEED;
    let next = match heading {
        PatrolDirection::Right if pos.x >= right => {
            pos.x = right;
            PatrolDirection::Down
        }
        PatrolDirection::Down if pos.y >= bottom => {
            pos.y = bottom;
            PatrolDirection::Left
        }
        PatrolDirection::Left if pos.x <= margin => {
            pos.x = margin;
            PatrolDirection::Up
        }
        PatrolDirection::Up if pos.y <= margin => {
            pos.y = margin;
            PatrolDirection::Right
        }
        other => other,
    };
    (pos, next)
}

/// Unit velocity for a patrol heading.
pub fn patrol_velocity(heading: PatrolDirection) -> Vec2 {
    match heading {
        PatrolDirection::Right => Vec2::new(1.0, 0.0),
        PatrolDirection::Down => Vec2::new(0.0, 1.0),
        PatrolDirection::Left => Vec2::new(-1.0, 0.0),
        PatrolDirection::Up => Vec2::new(0.0, -1.0),
    }
}

/// The four fixed screen-edge anchors blue enemies spawn at, each with the
/// heading that continues the clockwise patrol from that corner.
pub fn blue_anchors(field_width: f32, field_height: f32) -> [(Vec2, PatrolDirection); 4] {
    let margin = BLUE_PATROL_MARGIN;
    let right = field_width - margin;
    let bottom = field_height - BLUE_PATROL_BOTTOM_OFFSET;
    [
        (Vec2::new(margin, margin), PatrolDirection::Right),
        (Vec2::new(right, margin), PatrolDirection::Down),
        (Vec2::new(right, bottom), PatrolDirection::Left),
        (Vec2::new(margin, bottom), PatrolDirection::Up),
    ]
}

/// Bullet velocity aimed from `from` at `target`.
pub fn aimed_shot(from: Vec2, target: Vec2) -> Vec2 {
    direction(angle_between(from, target)) * ENEMY_BULLET_SPEED
}
