//! Systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only)
//! plus whatever engine state they touch. They own no state themselves.

pub mod bullets;
pub mod cleanup;
pub mod collision;
pub mod enemies;
pub mod particles;
pub mod player;
pub mod progression;
pub mod skills;
pub mod snapshot;
pub mod wave_spawner;
