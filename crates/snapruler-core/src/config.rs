//! Session configuration.

use crate::history::MAX_UNDO_HISTORY;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default grid spacing in pixels (about 5 mm on a 254 dpi screen).
pub const DEFAULT_GRID_SIZE: f64 = 50.0;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunables for a drawing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Grid spacing in pixels.
    pub grid_size: f64,
    /// Undo entries kept before the oldest is evicted.
    pub max_undo_depth: usize,
    /// Whether snapping starts enabled.
    pub snap_enabled: bool,
    /// Offer common-angle candidates while drawing.
    pub angle_snapping: bool,
    /// Offer line-crossing candidates.
    pub intersection_snapping: bool,
    /// Minimum zoom level.
    pub min_zoom: f64,
    /// Maximum zoom level.
    pub max_zoom: f64,
    /// Stroke width of committed shapes.
    pub stroke_width: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            max_undo_depth: MAX_UNDO_HISTORY,
            snap_enabled: true,
            angle_snapping: false,
            intersection_snapping: false,
            min_zoom: 0.1,
            max_zoom: 10.0,
            stroke_width: 3.0,
        }
    }
}

impl SessionConfig {
    /// Serialize the config to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Ok(Self::from_json(&json)?)
    }

    /// Load a config file, falling back to defaults if it is missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Using default config, failed to load {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write the config file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
