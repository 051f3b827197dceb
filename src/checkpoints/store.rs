//! Checkpoint store: save, load, resume check and delete for a run directory
//!
//! Checkpointing is an optimization for the scan agent, never a requirement.
//! Every operation here is total: failures are classified, logged and turned
//! into a no-op or an absent result, so a broken checkpoint can never abort a
//! scan.

use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, error, info, warn};

use super::error::CheckpointError;
use super::snapshot::{snapshot_completed, snapshot_iteration, AgentSnapshot};
use super::types::{target_count, Checkpoint, ScanConfig};
use crate::config::StoreConfig;
use crate::fs::checkpoints::{read_checkpoint, remove_checkpoint, write_checkpoint};

/// Outcome of checking whether a run can be resumed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeDecision {
    /// A valid, unfinished checkpoint compatible with the current config
    Resumable { iteration: u64 },
    /// No checkpoint, or one that failed to load or validate
    NoCheckpoint,
    /// The checkpointed scan already finished
    AlreadyCompleted,
    /// The checkpoint was taken for a different number of targets
    TargetCountMismatch { saved: usize, current: usize },
}

impl ResumeDecision {
    pub fn is_resumable(&self) -> bool {
        matches!(self, ResumeDecision::Resumable { .. })
    }
}

impl std::fmt::Display for ResumeDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResumeDecision::Resumable { iteration } => {
                write!(f, "resumable from iteration {iteration}")
            }
            ResumeDecision::NoCheckpoint => write!(f, "no valid checkpoint"),
            ResumeDecision::AlreadyCompleted => write!(f, "scan already completed"),
            ResumeDecision::TargetCountMismatch { saved, current } => write!(
                f,
                "target mismatch: checkpoint has {saved} targets, current scan has {current}"
            ),
        }
    }
}

/// Persists one checkpoint per run directory
#[derive(Debug, Clone, Default)]
pub struct CheckpointStore {
    config: StoreConfig,
}

impl CheckpointStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Snapshot the agent state and persist a checkpoint, replacing any
    /// previous one in `run_dir`.
    ///
    /// Never fails. On error the previous checkpoint is left intact.
    pub fn save<S: AgentSnapshot>(
        &self,
        run_dir: &Path,
        agent_state: &S,
        scan_config: &ScanConfig,
        tracer_data: Option<&Map<String, Value>>,
    ) {
        match agent_state.to_snapshot() {
            Ok(snapshot) => self.save_snapshot(run_dir, snapshot, scan_config, tracer_data),
            Err(e) => report_save_failure(run_dir, &e),
        }
    }

    /// Persist an already-serialized agent state.
    ///
    /// Never fails; see [`save`](Self::save).
    pub fn save_snapshot(
        &self,
        run_dir: &Path,
        agent_state: Map<String, Value>,
        scan_config: &ScanConfig,
        tracer_data: Option<&Map<String, Value>>,
    ) {
        let checkpoint = Checkpoint::new(agent_state, scan_config.clone())
            .with_tracer_data(tracer_data.cloned());

        match write_checkpoint(run_dir, &checkpoint, self.config.sync_writes) {
            Ok(path) => info!(
                path = %path.display(),
                iteration = checkpoint.iteration(),
                "Saved checkpoint at iteration {}",
                checkpoint.iteration()
            ),
            Err(e) if e.is_committed() => warn!(
                run_dir = %run_dir.display(),
                iteration = checkpoint.iteration(),
                "Checkpoint saved but directory sync failed: {e}"
            ),
            Err(e) => report_save_failure(run_dir, &e),
        }
    }

    /// Load the checkpoint of a run if one exists and is valid.
    ///
    /// Never fails: a missing, unreadable, malformed or incompatible
    /// checkpoint yields `None`.
    pub fn load(&self, run_dir: &Path) -> Option<Checkpoint> {
        match read_checkpoint(run_dir) {
            Ok(Some(checkpoint)) => {
                info!(
                    run_dir = %run_dir.display(),
                    iteration = checkpoint.iteration(),
                    "Loaded valid checkpoint"
                );
                Some(checkpoint)
            }
            Ok(None) => {
                debug!(run_dir = %run_dir.display(), "No checkpoint found");
                None
            }
            Err(e) if e.is_incompatible() => {
                warn!(run_dir = %run_dir.display(), "{e}. Cannot resume.");
                None
            }
            Err(e) => {
                error!(run_dir = %run_dir.display(), "Failed to load checkpoint: {e}");
                None
            }
        }
    }

    /// Decide whether the run in `run_dir` can resume under `current_config`.
    ///
    /// Compatibility only compares the number of targets, not their values.
    pub fn resume_decision(&self, run_dir: &Path, current_config: &ScanConfig) -> ResumeDecision {
        let Some(checkpoint) = self.load(run_dir) else {
            return ResumeDecision::NoCheckpoint;
        };

        if snapshot_completed(&checkpoint.agent_state) {
            info!(run_dir = %run_dir.display(), "Checkpoint found but scan already completed");
            return ResumeDecision::AlreadyCompleted;
        }

        let saved = target_count(&checkpoint.scan_config);
        let current = target_count(current_config);
        if saved != current {
            let decision = ResumeDecision::TargetCountMismatch { saved, current };
            warn!(run_dir = %run_dir.display(), "{decision}. Cannot resume.");
            return decision;
        }

        ResumeDecision::Resumable {
            iteration: snapshot_iteration(&checkpoint.agent_state),
        }
    }

    /// True if a valid, unfinished, target-compatible checkpoint exists
    pub fn can_resume(&self, run_dir: &Path, current_config: &ScanConfig) -> bool {
        self.resume_decision(run_dir, current_config).is_resumable()
    }

    /// Remove the checkpoint of a run. No-op if there is none.
    ///
    /// Never fails; a deletion error is logged as a warning.
    pub fn delete(&self, run_dir: &Path) {
        match remove_checkpoint(run_dir) {
            Ok(true) => info!(run_dir = %run_dir.display(), "Deleted checkpoint"),
            Ok(false) => debug!(run_dir = %run_dir.display(), "No checkpoint to delete"),
            Err(e) => warn!(run_dir = %run_dir.display(), "Failed to delete checkpoint: {e}"),
        }
    }
}

fn report_save_failure(run_dir: &Path, e: &CheckpointError) {
    error!(run_dir = %run_dir.display(), "Failed to save checkpoint: {e}");
}
