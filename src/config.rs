//! Settings persisted between sessions.
//!
//! The only setting is the block id format. It lives in a `smartblock.toml` (or whichever
//! path `--settings` names), is merged over the defaults when loaded, and is written back
//! every time it changes.

use crate::block_id::DEFAULT_FORMAT;
use crate::error::SmartBlockError;
use facet::Facet;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings file used when no path is given.
pub const DEFAULT_SETTINGS_FILE: &str = "smartblock.toml";

#[derive(Facet, Clone, Debug, PartialEq, Eq)]
/// User preferences loaded from smartblock.toml or falling back to defaults.
pub struct Settings {
    #[facet(default = DEFAULT_FORMAT.to_string())]
    /// Moment.js-style pattern the block id is generated from.
    pub format: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.to_string(),
        }
    }
}

/// Persistent home for [`Settings`].
pub trait SettingsStore {
    /// Load stored settings merged over the defaults.
    fn load(&self) -> Settings;

    /// Persist `settings`, replacing whatever was stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be serialised or written.
    fn save(&self, settings: &Settings) -> Result<(), SmartBlockError>;
}

/// Settings stored as TOML in a single file.
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    #[must_use]
    /// Store backed by the file at `path`, which need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    /// Location of the settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> Settings {
        let Ok(contents) = fs::read_to_string(&self.path) else {
            debug!("No settings at {}, using defaults", self.path.display());
            return Settings::default();
        };
        match facet_toml::from_str::<Settings>(&contents) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(
                    "Ignoring malformed settings in {}: {e}",
                    self.path.display()
                );
                Settings::default()
            }
        }
    }

    fn save(&self, settings: &Settings) -> Result<(), SmartBlockError> {
        let contents =
            facet_toml::to_string(settings).map_err(|e| SmartBlockError::Settings(e.to_string()))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, contents)?;
        debug!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
