//! Checkpoint file I/O operations
//!
//! Handles reading and writing the checkpoint file at `{run_dir}/checkpoint.json`.
//! These are the fallible primitives; `CheckpointStore` wraps them with the
//! never-fail policy.

use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::checkpoints::error::{CheckpointError, CheckpointResult};
use crate::checkpoints::{Checkpoint, CHECKPOINT_FILE, CHECKPOINT_VERSION, REQUIRED_FIELDS};
use crate::fs::atomic::{is_temp_for, write_atomic};

/// Get the path to the checkpoint file of a run
pub fn checkpoint_path(run_dir: &Path) -> PathBuf {
    run_dir.join(CHECKPOINT_FILE)
}

/// Check if a file name is a temp file staged while saving a checkpoint
pub fn is_checkpoint_temp(run_dir: &Path, name: &str) -> bool {
    is_temp_for(&checkpoint_path(run_dir), name)
}

/// Check if a checkpoint file exists (valid or not)
pub fn checkpoint_exists(run_dir: &Path) -> bool {
    checkpoint_path(run_dir).is_file()
}

/// Write a checkpoint file, replacing any previous one atomically.
///
/// The run directory must already exist.
pub fn write_checkpoint(
    run_dir: &Path,
    checkpoint: &Checkpoint,
    sync: bool,
) -> CheckpointResult<PathBuf> {
    let path = checkpoint_path(run_dir);
    let json = serde_json::to_vec_pretty(checkpoint)?;
    write_atomic(&path, &json, sync)?;
    Ok(path)
}

/// Read and validate a checkpoint file.
///
/// Returns `Ok(None)` when no checkpoint exists. The version is checked
/// before the required fields, and both before the typed decode.
pub fn read_checkpoint(run_dir: &Path) -> CheckpointResult<Option<Checkpoint>> {
    let path = checkpoint_path(run_dir);

    let content = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(CheckpointError::io(&path, e)),
    };

    parse_checkpoint(&path, &content).map(Some)
}

/// Validate and decode checkpoint file content read from `path`
pub fn parse_checkpoint(path: &Path, content: &str) -> CheckpointResult<Checkpoint> {
    let raw: Value = serde_json::from_str(content)
        .map_err(|e| CheckpointError::deserialize(path, e.to_string()))?;

    let Value::Object(fields) = &raw else {
        return Err(CheckpointError::deserialize(
            path,
            format!(
                "expected a JSON object, got {}",
                crate::checkpoints::snapshot::json_kind(&raw)
            ),
        ));
    };

    match fields.get("version") {
        Some(v) if v.as_u64() == Some(u64::from(CHECKPOINT_VERSION)) => {}
        Some(v) => {
            return Err(CheckpointError::incompatible_version(
                path,
                CHECKPOINT_VERSION,
                v.to_string(),
            ))
        }
        None => {
            return Err(CheckpointError::incompatible_version(
                path,
                CHECKPOINT_VERSION,
                "none",
            ))
        }
    }

    if let Some(field) = REQUIRED_FIELDS.iter().find(|f| !fields.contains_key(**f)) {
        return Err(CheckpointError::missing_field(path, *field));
    }

    serde_json::from_value(raw).map_err(|e| CheckpointError::deserialize(path, e.to_string()))
}

/// Delete the checkpoint file. Succeeds if there is nothing to delete.
///
/// Returns whether a file was removed.
pub fn remove_checkpoint(run_dir: &Path) -> CheckpointResult<bool> {
    let path = checkpoint_path(run_dir);
    match fs::remove_file(&path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(CheckpointError::io(&path, e)),
    }
}
