//! Game settings
//!
//! Tuning for the adversary policy plus driver options, read from a JSON file.
//! Every field has a default, so a settings file only needs the keys it changes.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{PURSUE_CHANCE, TICK_INTERVAL_MS, WANDER_CHANCE};
use crate::error::{SettingsError, SimError};
use crate::sim::AdversaryController;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed for the session
    pub seed: u64,

    // === Adversary tuning ===
    /// Chance per tick of a random heading (0.0 - 1.0)
    pub wander_chance: f64,
    /// Chance per tick of steering toward the agent (0.0 - 1.0)
    pub pursue_chance: f64,

    // === Driver ===
    /// Milliseconds between ticks
    pub tick_interval_ms: u64,
    /// Stop after this many ticks (None = run until game over)
    pub max_ticks: Option<u64>,
    /// Print a frame every N ticks
    pub render_every: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5EED,

            wander_chance: WANDER_CHANCE,
            pursue_chance: PURSUE_CHANCE,

            tick_interval_ms: TICK_INTERVAL_MS,
            max_ticks: Some(5_000),
            render_every: 25,
        }
    }
}

impl Settings {
    /// Environment variable naming a settings file
    pub const ENV_VAR: &'static str = "MAZE_CHASE_SETTINGS";

    pub fn validate(&self) -> Result<(), SimError> {
        AdversaryController::new(self.wander_chance, self.pursue_chance).map(|_| ())
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load from `path`, or the file named by `MAZE_CHASE_SETTINGS`, falling
    /// back to defaults when neither is given or the file is unusable.
    pub fn load(path: Option<&Path>) -> Self {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(Self::ENV_VAR).map(PathBuf::from));

        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                log::debug!("{settings:?}");
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.tick_interval(), Duration::from_millis(40));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 42, "pursue_chance": 0.5 }"#).unwrap();
        assert_eq!(settings.seed, 42);
        assert_eq!(settings.pursue_chance, 0.5);
        assert_eq!(settings.wander_chance, WANDER_CHANCE);
        assert_eq!(settings.render_every, 25);
    }

    #[test]
    fn test_rejects_out_of_range_probability() {
        let err = Settings::from_json(r#"{ "wander_chance": 1.2 }"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid(SimError::InvalidProbability {
                name: "wander_chance",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Settings::from_json("{ seed: ").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let path = Path::new("/nonexistent/maze-chase/settings.json");
        let err = Settings::load_from(path).unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
        assert_eq!(Settings::load(Some(path)), Settings::default());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir()
            .join(format!("maze-chase-settings-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "seed": 7, "max_ticks": null }"#).unwrap();
        let settings = Settings::load(Some(&path));
        std::fs::remove_file(&path).unwrap();
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.max_ticks, None);
    }
}
