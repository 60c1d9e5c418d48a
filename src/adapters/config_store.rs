//! JSON file configuration adapter.
//!
//! Implements [`ConfigPort`] over a single JSON file.  Values are
//! range-checked with [`BotConfig::validate`] both when loading and before
//! persisting; an invalid file is reported, never silently clamped.
//!
//! Saves go through a sibling temp file and a rename, so a crash mid-write
//! leaves the previous config intact.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::info;

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::BotConfig;

pub struct JsonConfigStore {
    path: PathBuf,
}

impl JsonConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored config, or the defaults when no file exists yet.
    /// Corrupt or out-of-range files are still an error.
    pub fn load_or_default(&self) -> Result<BotConfig, ConfigError> {
        match self.load() {
            Err(ConfigError::NotFound) => {
                info!(
                    "JsonConfigStore: {} not found, using defaults",
                    self.path.display()
                );
                Ok(BotConfig::default())
            }
            other => other,
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl ConfigPort for JsonConfigStore {
    fn load(&self) -> Result<BotConfig, ConfigError> {
        let bytes = fs::read(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::NotFound,
            _ => ConfigError::IoError,
        })?;
        let cfg: BotConfig =
            serde_json::from_slice(&bytes).map_err(|_| ConfigError::Corrupted)?;
        cfg.validate().map_err(ConfigError::ValidationFailed)?;
        info!(
            "JsonConfigStore: loaded config from {} ({} bytes)",
            self.path.display(),
            bytes.len()
        );
        Ok(cfg)
    }

    fn save(&self, config: &BotConfig) -> Result<(), ConfigError> {
        config.validate().map_err(ConfigError::ValidationFailed)?;
        let json = serde_json::to_vec_pretty(config).map_err(|_| ConfigError::IoError)?;

        let tmp = self.tmp_path();
        fs::write(&tmp, &json).map_err(|_| ConfigError::IoError)?;
        fs::rename(&tmp, &self.path).map_err(|_| ConfigError::IoError)?;

        info!(
            "JsonConfigStore: saved config to {} ({} bytes)",
            self.path.display(),
            json.len()
        );
        Ok(())
    }
}
