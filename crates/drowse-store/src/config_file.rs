//! TOML implementation of the durable configuration store

use crate::{ConfigBackend, StoreError};
use drowse_domain::{Settings, DEFAULT_TIMEOUT_MINUTES};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What actually goes on disk. Kept separate from the domain type so the
/// file format can carry serde defaults without the domain crate picking
/// up a serde dependency.
#[derive(Debug, Serialize, Deserialize)]
struct SettingsFile {
    #[serde(default = "default_timeout_minutes")]
    timeout_minutes: u32,
    #[serde(default)]
    allow_list: Vec<String>,
    #[serde(default)]
    debug: bool,
}

fn default_timeout_minutes() -> u32 {
    DEFAULT_TIMEOUT_MINUTES
}

impl From<SettingsFile> for Settings {
    fn from(file: SettingsFile) -> Self {
        Settings {
            timeout_minutes: file.timeout_minutes,
            allow_list: file.allow_list,
            debug: file.debug,
        }
    }
}

impl From<&Settings> for SettingsFile {
    fn from(settings: &Settings) -> Self {
        SettingsFile {
            timeout_minutes: settings.timeout_minutes,
            allow_list: settings.allow_list.clone(),
            debug: settings.debug,
        }
    }
}

/// TOML-file configuration backend.
///
/// The configuration store is the slow, user-visible one; a plain TOML
/// file keeps it inspectable and lets whatever synchronizes the user's
/// files carry it across machines.
pub struct TomlConfigBackend {
    path: PathBuf,
}

impl TomlConfigBackend {
    /// Create a backend reading and writing `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigBackend for TomlConfigBackend {
    fn load(&self) -> Result<Option<Settings>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path)?;
        let file: SettingsFile = toml::from_str(&contents)?;
        Ok(Some(file.into()))
    }

    fn save(&self, settings: &Settings) -> Result<(), StoreError> {
        let contents = toml::to_string_pretty(&SettingsFile::from(settings))?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}
