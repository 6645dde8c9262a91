//! Core types and definitions for the ASCENSION simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! entity components, the skill catalog, commands, events, state snapshots,
//! configuration and constants. It contains no engine logic.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod skills;
pub mod state;
pub mod types;
pub mod upgrades;

#[cfg(test)]
mod tests;
