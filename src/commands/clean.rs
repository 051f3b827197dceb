//! Clean command - remove the checkpoint of a run
//!
//! Usage: scan-checkpoint delete <run-dir>

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::checkpoints::CheckpointStore;
use crate::fs::checkpoints::checkpoint_exists;

/// Execute the delete command
pub fn execute(store: &CheckpointStore, run_dir: &Path) -> Result<()> {
    if !checkpoint_exists(run_dir) {
        println!("{} No checkpoint in {}", "─".dimmed(), run_dir.display());
        return Ok(());
    }

    store.delete(run_dir);

    if checkpoint_exists(run_dir) {
        println!(
            "{} Checkpoint in {} could not be removed (see log)",
            "✗".red().bold(),
            run_dir.display()
        );
    } else {
        println!("{} Checkpoint deleted", "✓".green().bold());
    }
    Ok(())
}
