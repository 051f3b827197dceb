//! Checkpoint command implementation
//!
//! Usage: scan-checkpoint save <run-dir> --agent-state <file> --scan-config <file> [--tracer-data <file>]
//!
//! Writes a checkpoint from JSON files, mainly for seeding and repairing runs
//! by hand. The run directory is created if missing.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;

use crate::checkpoints::CheckpointStore;
use crate::commands::common::read_json_object;
use crate::fs::checkpoints::checkpoint_path;

/// Execute the save command
pub fn execute(
    store: &CheckpointStore,
    run_dir: &Path,
    agent_state_path: &Path,
    scan_config_path: &Path,
    tracer_data_path: Option<&Path>,
) -> Result<()> {
    let agent_state = read_json_object(agent_state_path)?;
    let scan_config = read_json_object(scan_config_path)?;
    let tracer_data = tracer_data_path.map(read_json_object).transpose()?;

    fs::create_dir_all(run_dir)
        .with_context(|| format!("Failed to create run directory: {}", run_dir.display()))?;

    store.save_snapshot(run_dir, agent_state, &scan_config, tracer_data.as_ref());

    // The store never reports failure; confirm by reading back
    if store.load(run_dir).is_some() {
        println!(
            "{} Checkpoint written to {}",
            "✓".green().bold(),
            checkpoint_path(run_dir).display()
        );
        Ok(())
    } else {
        anyhow::bail!(
            "Checkpoint could not be written to {}",
            checkpoint_path(run_dir).display()
        )
    }
}
