//! Checkpoint module for scan resumption
//!
//! This module provides:
//! - The checkpoint record and its on-disk format constants
//! - The agent snapshot contract
//! - The never-failing checkpoint store

pub mod error;
pub mod snapshot;
mod store;
mod types;

pub use error::{CheckpointError, CheckpointResult};
pub use snapshot::{
    snapshot_completed, snapshot_from_serde, snapshot_into_serde, snapshot_iteration,
    AgentSnapshot,
};
pub use store::{CheckpointStore, ResumeDecision};
pub use types::{
    target_count, Checkpoint, ScanConfig, CHECKPOINT_FILE, CHECKPOINT_VERSION, REQUIRED_FIELDS,
    TEMP_SUFFIX,
};
