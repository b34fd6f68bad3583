//! Game settings
//!
//! Supplied by the embedder as JSON; nothing here is persisted.

use serde::{Deserialize, Serialize};

use crate::consts::TICK_INTERVAL_MS;
use crate::error::ConfigError;
use crate::sim::PlayArea;

/// Embedder-facing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Size of the area items spawn into
    pub play_area: PlayArea,
    /// RNG seed for generation (0 lets the front end pick one)
    pub seed: u64,
    /// Drop extra items into the play area on later levels
    pub spawn_items: bool,
    /// Countdown period the timer collaborator should use
    pub tick_interval_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            play_area: PlayArea::default(),
            seed: 0,
            spawn_items: true,
            tick_interval_ms: TICK_INTERVAL_MS,
        }
    }
}

impl Settings {
    /// Default settings with a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parse and validate settings; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!("Loaded settings (seed {})", settings.seed);
        Ok(settings)
    }

    /// Replace invalid fields with their defaults
    pub fn sanitized(mut self) -> Self {
        if !self.play_area.is_valid() {
            self.play_area = PlayArea::default();
        }
        if self.tick_interval_ms == 0 {
            self.tick_interval_ms = TICK_INTERVAL_MS;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.play_area.is_valid() {
            return Err(ConfigError::InvalidPlayArea {
                width: self.play_area.width,
                height: self.play_area.height,
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidTickInterval);
        }
        Ok(())
    }
}
