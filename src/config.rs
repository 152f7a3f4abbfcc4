// src/config.rs
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// How many per-account list snapshots each service cache retains.
pub const DEFAULT_CACHE_CAPACITY: usize = 16;

/// Runtime settings, read from `mediashelf.toml` under the platform
/// config directory. Every field has a default so a missing file (the
/// common case) behaves exactly like an empty one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Overrides the database file location. When unset the database
    /// lives under the platform data directory.
    pub database_path: Option<PathBuf>,

    /// Capacity of the per-service list caches, counted in accounts.
    pub cache_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database_path: None,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl Settings {
    /// Returns the settings file location: `{config_dir}/mediashelf/mediashelf.toml`.
    pub fn default_path() -> AppResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AppError::Config("Could not determine config directory".to_string()))?;
        Ok(config_dir.join("mediashelf").join("mediashelf.toml"))
    }

    /// Loads the settings from the platform config directory. A missing
    /// file yields the defaults.
    pub fn load() -> AppResult<Settings> {
        Settings::load_from(&Settings::default_path()?)
    }

    /// Loads the settings from `path`. A missing file yields the
    /// defaults; a file that exists but does not parse is an error, so a
    /// typo never silently discards the overrides.
    pub fn load_from(path: &Path) -> AppResult<Settings> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Settings::default());
            }
            Err(e) => return Err(AppError::Io(e)),
        };

        toml::from_str(&contents)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))
    }

    /// Writes the settings to `path`, creating parent directories as
    /// needed.
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}
