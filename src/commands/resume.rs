//! Resume check command
//!
//! Usage: scan-checkpoint resume <run-dir> --scan-config <file>
//!
//! Reports whether the run can be resumed under the given scan configuration.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::checkpoints::{CheckpointStore, ResumeDecision};
use crate::commands::common::read_json_object;

/// Execute the resume check. Returns the decision so the caller can map it
/// to an exit code.
pub fn execute(
    store: &CheckpointStore,
    run_dir: &Path,
    scan_config_path: &Path,
) -> Result<ResumeDecision> {
    let current_config = read_json_object(scan_config_path)?;
    let decision = store.resume_decision(run_dir, &current_config);

    if decision.is_resumable() {
        println!("{} Run can be resumed: {decision}", "✓".green().bold());
    } else {
        println!("{} Run cannot be resumed: {decision}", "✗".yellow().bold());
    }

    Ok(decision)
}
