//! Game settings
//!
//! Read from an optional JSON file; anything missing takes its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::Difficulty;

/// Driver and simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Difficulty the autopilot picks from the menu
    pub difficulty: Difficulty,
    /// Seed for the simulation RNG
    pub seed: u64,
    /// Where sprite files are looked up
    pub assets_dir: String,
    /// Let the built-in pilot play
    pub autopilot: bool,
    /// Headless run length
    pub max_ticks: u64,
    /// Nominal tick interval
    pub tick_millis: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            seed: 0x5EED,
            assets_dir: "assets".to_string(),
            autopilot: true,
            max_ticks: 20_000,
            tick_millis: 16,
        }
    }
}

impl Settings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from a file, falling back to defaults on any failure
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Tick interval in seconds
    pub fn tick_secs(&self) -> f32 {
        self.tick_millis as f32 / 1000.0
    }
}
