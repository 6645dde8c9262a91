//! Simulation configuration and its loading errors.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEFAULT_FIELD_HEIGHT, DEFAULT_FIELD_WIDTH, TICK_RATE};
use crate::enums::SpawnPausePolicy;

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid play field {width}x{height}")]
    InvalidField { width: f32, height: f32 },

    #[error("tick rate must be positive")]
    InvalidTickRate,
}

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed + same inputs = same simulation.
    pub seed: u64,
    pub field_width: f32,
    pub field_height: f32,
    /// Frames per second the driver should run the engine at.
    pub tick_rate: u32,
    pub spawn_pause_policy: SpawnPausePolicy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            field_width: DEFAULT_FIELD_WIDTH,
            field_height: DEFAULT_FIELD_HEIGHT,
            tick_rate: TICK_RATE,
            spawn_pause_policy: SpawnPausePolicy::default(),
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(self.field_width) || !valid(self.field_height) {
            return Err(ConfigError::InvalidField {
                width: self.field_width,
                height: self.field_height,
            });
        }
        if self.tick_rate == 0 {
            return Err(ConfigError::InvalidTickRate);
        }
        Ok(())
    }
}
