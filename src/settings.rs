//! Game settings
//!
//! JSON with every field optional. Native runs read a file path given on the
//! command line; the browser keeps settings in LocalStorage.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Arena;
use crate::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH, TICK_RATE_HZ};

/// Settings errors
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Arena width in pixels (native only; the browser uses the window)
    pub width: f32,
    /// Arena height in pixels
    pub height: f32,
    /// Fixed RNG seed; None picks one from the clock
    pub seed: Option<u64>,
    /// High-score file for native runs
    pub score_file: PathBuf,
    /// Ticks the headless demo runs before giving up
    pub demo_ticks: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: None,
            score_file: PathBuf::from("astro_drift_scores.json"),
            // Five minutes of play
            demo_ticks: 5 * 60 * TICK_RATE_HZ as u64,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "astro_drift_settings";

    /// Arena described by the configured size
    ///
    /// Non-positive or non-finite sizes fall back to the defaults.
    pub fn arena(&self) -> Arena {
        Arena::sized_or_default(self.width, self.height)
    }

    /// Parse settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&contents)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {e}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }
}
