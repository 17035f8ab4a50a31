// SPDX-License-Identifier: Apache-2.0
//! Persisted hub preferences (JSON under the platform config directory).

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Preferences the hub reloads at startup and persists on change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubPrefs {
    /// Address the command listener binds.
    pub listen_addr: String,
    /// Point sprite size handed to the render port.
    pub point_size: f32,
    /// Fraction of accumulated objects drawn each frame.
    pub filter: f32,
}

impl Default for HubPrefs {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:10000".to_owned(),
            point_size: 5.0,
            filter: 1.0,
        }
    }
}

/// Error type for preference load/save.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error while reading/writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization/deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// The platform config directory could not be resolved.
    #[error("could not resolve config dir")]
    NoConfigDir,
}

/// Storage port for preference blobs, so tests can point at a temp dir.
pub trait PrefsStore {
    /// Load the preferences, `Ok(None)` when nothing is persisted yet.
    fn load(&self) -> Result<Option<HubPrefs>, ConfigError>;
    /// Persist the preferences.
    fn save(&self, prefs: &HubPrefs) -> Result<(), ConfigError>;
}

/// JSON file under the platform config directory.
pub struct FsPrefsStore {
    base: PathBuf,
}

impl FsPrefsStore {
    /// Store rooted at the user config directory (e.g. `~/.config/scrawl`).
    pub fn new() -> Result<Self, ConfigError> {
        let proj =
            ProjectDirs::from("dev", "scrawl-viz", "scrawl").ok_or(ConfigError::NoConfigDir)?;
        let base = proj.config_dir().to_path_buf();
        fs::create_dir_all(&base)?;
        Ok(Self { base })
    }

    /// Store rooted at an explicit directory. Used by tests.
    pub fn at(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    fn path(&self) -> PathBuf {
        self.base.join("hub.json")
    }
}

impl PrefsStore for FsPrefsStore {
    fn load(&self) -> Result<Option<HubPrefs>, ConfigError> {
        match fs::read(self.path()) {
            Ok(bytes) if bytes.is_empty() => Ok(None),
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn save(&self, prefs: &HubPrefs) -> Result<(), ConfigError> {
        fs::create_dir_all(&self.base)?;
        fs::write(self.path(), serde_json::to_vec_pretty(prefs)?)?;
        Ok(())
    }
}
