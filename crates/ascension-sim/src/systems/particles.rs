//! Cosmetic particles: materialising effect requests and per-tick fading.
//!
//! Nothing here is read by gameplay code.

use std::f32::consts::TAU;

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use ascension_core::components::Particle;
use ascension_core::enums::ParticleKind;
use ascension_core::events::EffectRequest;
use ascension_core::types::{direction, hue_to_rgb, Position, Velocity};

use crate::world_setup::spawn_particle;

const HIT_COLOR: u32 = 0xffff00;
const DEATH_COLOR: u32 = 0x00ff00;
const BARRIER_COLOR: u32 = 0x00ffff;

/// Advance particles by one tick and drop the expired ones.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, (pos, vel, particle)) in
        world.query_mut::<(&mut Position, &mut Velocity, &mut Particle)>()
    {
        pos.0 += vel.0;
        particle.life = particle.life.saturating_sub(1);
        match particle.kind {
            ParticleKind::Explosion | ParticleKind::Death => {
                particle.size *= 0.95;
                vel.0.y += 0.1;
            }
            ParticleKind::Dash => particle.size *= 0.9,
            ParticleKind::Hit | ParticleKind::Spark | ParticleKind::Barrier => {}
        }
        if particle.life == 0 {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Turn queued effect requests into particles.
pub fn emit_all(world: &mut World, rng: &mut ChaCha8Rng, effects: &mut Vec<EffectRequest>) {
    for effect in effects.drain(..) {
        emit(world, rng, effect);
    }
}

fn jitter(rng: &mut ChaCha8Rng, spread: f32) -> Vec2 {
    Vec2::new(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5) * spread
}

fn particle(kind: ParticleKind, size: f32, life: u32, color: u32) -> Particle {
    Particle {
        kind,
        size,
        life,
        color,
    }
}

/// Materialise a single effect.
pub fn emit(world: &mut World, rng: &mut ChaCha8Rng, effect: EffectRequest) {
    match effect {
        EffectRequest::Hit { x, y } => {
            for _ in 0..8 {
                let vel = jitter(rng, 5.0);
                let size = rng.gen::<f32>() * 3.0 + 1.0;
                spawn_particle(
                    world,
                    Vec2::new(x, y),
                    vel,
                    particle(ParticleKind::Hit, size, 10, HIT_COLOR),
                );
            }
        }
        EffectRequest::Explosion { x, y } => {
            for i in 0..20 {
                let angle = TAU * i as f32 / 20.0;
                let speed = rng.gen::<f32>() * 5.0 + 2.0;
                let size = rng.gen::<f32>() * 5.0 + 3.0;
                let color = hue_to_rgb(rng.gen::<f32>() * 60.0);
                spawn_particle(
                    world,
                    Vec2::new(x, y),
                    direction(angle) * speed,
                    particle(ParticleKind::Explosion, size, 30, color),
                );
            }
        }
        EffectRequest::Dash { x, y } => {
            for _ in 0..15 {
                let vel = jitter(rng, 15.0);
                let size = rng.gen::<f32>() * 8.0 + 4.0;
                let color = hue_to_rgb(180.0 + rng.gen::<f32>() * 60.0);
                spawn_particle(
                    world,
                    Vec2::new(x, y),
                    vel,
                    particle(ParticleKind::Dash, size, 25, color),
                );
            }
        }
        EffectRequest::Ricochet { x, y } => {
            for _ in 0..8 {
                let vel = jitter(rng, 10.0);
                let size = rng.gen::<f32>() * 5.0 + 2.0;
                spawn_particle(
                    world,
                    Vec2::new(x, y),
                    vel,
                    particle(ParticleKind::Spark, size, 15, HIT_COLOR),
                );
            }
        }
        EffectRequest::Death { x, y } => {
            for i in 0..50 {
                let angle = TAU * i as f32 / 50.0;
                let speed = rng.gen::<f32>() * 15.0 + 5.0;
                let size = rng.gen::<f32>() * 10.0 + 5.0;
                spawn_particle(
                    world,
                    Vec2::new(x, y),
                    direction(angle) * speed,
                    particle(ParticleKind::Death, size, 60, DEATH_COLOR),
                );
            }
        }
        EffectRequest::BarrierSpark {
            x,
            y,
            radius,
            angle,
        } => {
            let dir = direction(angle);
            spawn_particle(
                world,
                Vec2::new(x, y) + dir * radius,
                dir * 0.5,
                particle(ParticleKind::Barrier, 3.0, 20, BARRIER_COLOR),
            );
        }
    }
}
