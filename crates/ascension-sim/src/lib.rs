//! Simulation engine for ASCENSION.
//!
//! Owns the hecs ECS world, runs systems once per driver frame,
//! and produces GameStateSnapshots for the renderer.

pub mod engine;
pub mod game_state;
pub mod scheduler;
pub mod systems;
pub mod world_setup;

pub use ascension_core::config::SimConfig;
pub use engine::GameEngine;
