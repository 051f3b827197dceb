//! Checkpoint store configuration
//!
//! Read from `config.toml`, either at an explicit path or under the user's
//! config directory (`{config_dir}/scan-checkpoint/config.toml`). A missing
//! file means defaults.
//!
//! ```toml
//! sync_writes = true
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Tunables for [`CheckpointStore`](crate::checkpoints::CheckpointStore).
///
/// The file name, temp suffix and schema version are part of the on-disk
/// format and are not configurable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// fsync the temp file before the rename, and the run directory after it
    pub sync_writes: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            sync_writes: true,
        }
    }
}

impl StoreConfig {
    /// Parse a config from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse checkpoint store config")
    }

    /// Load a config file. Errors if the file is missing or malformed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Invalid config: {}", path.display()))
    }

    /// Resolve the effective config.
    ///
    /// An explicit path must exist. Without one, the default location is used
    /// if present, otherwise defaults apply.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}

/// `{config_dir}/scan-checkpoint/config.toml`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("scan-checkpoint").join("config.toml"))
}
