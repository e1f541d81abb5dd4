//! Game settings
//!
//! Persisted as JSON next to the high score file. Missing fields fall back
//! to defaults, so older files keep loading.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH, TICKS_PER_SECOND};
use crate::highscores::PersistenceError;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub playfield_width: f32,
    pub playfield_height: f32,

    // === Simulation ===
    /// RNG seed; a fresh one is drawn when absent
    pub seed: Option<u64>,
    /// Driver cadence (ticks per second)
    pub ticks_per_second: u32,

    // === Storage ===
    pub high_score_path: PathBuf,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,

    // === Attract mode ===
    /// Ticks the headless demo runs before exiting
    pub demo_ticks: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,

            seed: None,
            ticks_per_second: TICKS_PER_SECOND,

            high_score_path: PathBuf::from("lockstep_invaders_highscore.txt"),

            master_volume: 0.8,
            muted: false,

            demo_ticks: 60 * 60,
        }
    }
}

impl Settings {
    /// Parse settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings, falling back to defaults if the file is missing or invalid
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("Invalid settings in {}: {}", path.display(), err);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Seed to use for a run
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7, "muted": true }"#).unwrap();
        assert_eq!(settings.seed, Some(7));
        assert!(settings.muted);
        assert_eq!(settings.playfield_width, PLAYFIELD_WIDTH);
        assert_eq!(settings.ticks_per_second, 60);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, PersistenceError::Json(_)));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings = Settings::load(Path::new("/nonexistent/lockstep/settings.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!(
            "lockstep-invaders-settings-{}.json",
            std::process::id()
        ));
        let settings = Settings {
            seed: Some(99),
            demo_ticks: 10,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_fixed_seed_is_used() {
        let settings = Settings {
            seed: Some(5),
            ..Default::default()
        };
        assert_eq!(settings.resolve_seed(), 5);
    }
}
