//! Pickup Configuration
//!
//! Tunables for the pickup/throw behavior. Loadable from JSON; every field
//! is optional in the file and falls back to the defaults below.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::KeyCode;

/// Errors that can occur while loading a [`PickupConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Standard I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    /// A value is outside its allowed range.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },
}

/// Pickup and throw parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupConfig {
    /// Maximum line-of-sight distance to grab an object (meters)
    pub pickup_range: f32,
    /// Throw impulse when the player stands still (N·s)
    pub base_throw_force: f32,
    /// Extra impulse per m/s of player speed
    pub max_throw_multiplier: f32,
    /// Held scale as a fraction of the original scale
    pub shrink_factor: f32,
    /// Rate of the shrink interpolation (per second)
    pub shrink_speed: f32,
    /// Tag an entity must carry to be picked up
    pub pickup_tag: String,
    /// Key bound to the interact action
    pub interact_key: KeyCode,
}

impl Default for PickupConfig {
    fn default() -> Self {
        Self {
            pickup_range: 5.0,
            base_throw_force: 10.0,
            max_throw_multiplier: 2.0,
            shrink_factor: 0.5,
            shrink_speed: 5.0,
            pickup_tag: "Pickup".to_string(),
            interact_key: KeyCode::E,
        }
    }
}

impl PickupConfig {
    /// Load and validate a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse and validate a config from a JSON string.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason| Err(ConfigError::InvalidValue { field, reason });

        if !(self.pickup_range > 0.0) {
            return invalid("pickup_range", "must be greater than zero");
        }
        if !(self.base_throw_force >= 0.0) {
            return invalid("base_throw_force", "must not be negative");
        }
        if !(self.max_throw_multiplier >= 0.0) {
            return invalid("max_throw_multiplier", "must not be negative");
        }
        if !(self.shrink_factor > 0.0 && self.shrink_factor <= 1.0) {
            return invalid("shrink_factor", "must be in (0, 1]");
        }
        if !(self.shrink_speed >= 0.0) {
            return invalid("shrink_speed", "must not be negative");
        }
        if self.pickup_tag.is_empty() {
            return invalid("pickup_tag", "must not be empty");
        }
        Ok(())
    }
}
