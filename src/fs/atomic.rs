//! Atomic file replacement
//!
//! Content is staged in an unpredictable sibling temp file
//! (`{name}.XXXXXX.tmp`) and persisted over the destination with a rename.
//! Both live in the same directory, so the rename stays on one filesystem and
//! readers observe either the old file or the new one. A temp file that never
//! gets persisted is removed when it is dropped.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tempfile::{Builder, NamedTempFile};
use tracing::debug;

use crate::checkpoints::error::{CheckpointError, CheckpointResult};
use crate::checkpoints::TEMP_SUFFIX;

/// Prefix shared by every temp file staged for `path`
fn temp_prefix(path: &Path) -> OsString {
    let mut prefix: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    prefix.push(".");
    prefix
}

/// True if `name` looks like a temp file staged for `path`
pub fn is_temp_for(path: &Path, name: &str) -> bool {
    let prefix = temp_prefix(path);
    prefix
        .to_str()
        .is_some_and(|p| name.starts_with(p) && name.ends_with(TEMP_SUFFIX))
}

/// Replace `path` with `content` atomically.
///
/// With `sync` set, the temp file is flushed to disk before the rename and the
/// parent directory is synced after it, so the new file survives power loss.
/// A failed directory sync is reported as [`CheckpointError::DirectorySync`]:
/// the new content is already in place at that point.
pub fn write_atomic(path: &Path, content: &[u8], sync: bool) -> CheckpointResult<()> {
    let parent = parent_dir(path);

    let mut staging = Builder::new()
        .prefix(&temp_prefix(path))
        .suffix(TEMP_SUFFIX)
        .tempfile_in(parent)
        .map_err(|e| CheckpointError::io(parent, e))?;

    write_staged(&mut staging, content, sync)?;

    staging
        .persist(path)
        .map_err(|e| CheckpointError::io(path, e.error))?;

    sweep_stale_temps(path);

    if sync {
        sync_parent_dir(path)?;
    }

    Ok(())
}

fn write_staged(staging: &mut NamedTempFile, content: &[u8], sync: bool) -> CheckpointResult<()> {
    let temp_path = staging.path().to_path_buf();
    staging
        .write_all(content)
        .map_err(|e| CheckpointError::io(&temp_path, e))?;
    if sync {
        staging
            .as_file()
            .sync_all()
            .map_err(|e| CheckpointError::io(&temp_path, e))?;
    }
    Ok(())
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

/// Remove temp files left behind by saves that were killed before their
/// rename. Best effort.
fn sweep_stale_temps(path: &Path) {
    let Ok(entries) = fs::read_dir(parent_dir(path)) else {
        return;
    };
    for entry in entries.flatten() {
        let name = entry.file_name();
        if name.to_str().is_some_and(|n| is_temp_for(path, n)) {
            let stale = entry.path();
            if fs::remove_file(&stale).is_ok() {
                debug!(path = %stale.display(), "Removed stale temp file");
            }
        }
    }
}

#[cfg(unix)]
fn sync_parent_dir(path: &Path) -> CheckpointResult<()> {
    let parent = parent_dir(path);
    File::open(parent)
        .and_then(|dir| dir.sync_all())
        .map_err(|e| CheckpointError::directory_sync(parent, e))
}

#[cfg(not(unix))]
fn sync_parent_dir(_path: &Path) -> CheckpointResult<()> {
    Ok(())
}
