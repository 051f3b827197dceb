//! Helpers shared by the CLI commands

use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use crate::checkpoints::CheckpointStore;
use crate::config::StoreConfig;

/// Build a store from an optional config file path
pub fn open_store(config_path: Option<&Path>) -> Result<CheckpointStore> {
    let config = StoreConfig::resolve(config_path)?;
    Ok(CheckpointStore::new(config))
}

/// Read a file holding a single JSON object
pub fn read_json_object(path: &Path) -> Result<Map<String, Value>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read JSON file: {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON file: {}", path.display()))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => bail!("Expected a JSON object in {}", path.display()),
    }
}
