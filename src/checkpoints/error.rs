//! Error types for checkpoint persistence.
//!
//! These never escape [`CheckpointStore`](super::CheckpointStore): the store
//! classifies them and degrades to a no-op or an absent result.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the fallible checkpoint primitives in `crate::fs`.
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// I/O failure while reading, writing, renaming or removing a file.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The new file is in place but its directory could not be synced.
    #[error("directory sync failed at {path}: {source}")]
    DirectorySync {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The checkpoint record could not be encoded.
    #[error("serialization error: {0}")]
    Serialize(String),

    /// The agent state refused to produce (or accept) a snapshot.
    #[error("agent snapshot error: {0}")]
    Snapshot(String),

    /// The file exists but is not a well-formed checkpoint.
    #[error("deserialization error at {path}: {message}")]
    Deserialize { path: PathBuf, message: String },

    /// The file was written by a different schema version.
    #[error("incompatible checkpoint version {found} at {path}, expected {expected}")]
    IncompatibleVersion {
        path: PathBuf,
        expected: u32,
        found: String,
    },

    /// A required top-level field is missing.
    #[error("checkpoint at {path} is missing field '{field}'")]
    MissingField { path: PathBuf, field: &'static str },
}

impl CheckpointError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn directory_sync(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DirectorySync {
            path: path.into(),
            source,
        }
    }

    pub fn deserialize(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Deserialize {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn incompatible_version(
        path: impl Into<PathBuf>,
        expected: u32,
        found: impl Into<String>,
    ) -> Self {
        Self::IncompatibleVersion {
            path: path.into(),
            expected,
            found: found.into(),
        }
    }

    pub fn missing_field(path: impl Into<PathBuf>, field: &'static str) -> Self {
        Self::MissingField {
            path: path.into(),
            field,
        }
    }

    /// True for "cannot resume" conditions that are expected in normal
    /// operation, as opposed to genuine I/O or encoding failures.
    pub fn is_incompatible(&self) -> bool {
        matches!(
            self,
            Self::IncompatibleVersion { .. } | Self::MissingField { .. }
        )
    }

    /// True if the write itself went through despite the error.
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::DirectorySync { .. })
    }
}

impl From<serde_json::Error> for CheckpointError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialize(e.to_string())
    }
}

pub type CheckpointResult<T> = Result<T, CheckpointError>;
