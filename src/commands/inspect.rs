//! Inspect command - summarize the checkpoint of a run
//!
//! Usage: scan-checkpoint inspect <run-dir>

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::checkpoints::{Checkpoint, CheckpointStore};
use crate::fs::checkpoints::{checkpoint_exists, checkpoint_path};

/// Execute the inspect command
pub fn execute(store: &CheckpointStore, run_dir: &Path) -> Result<()> {
    let path = checkpoint_path(run_dir);

    match store.load(run_dir) {
        Some(checkpoint) => {
            println!("{} {}", "Checkpoint:".bold(), path.display());
            for line in summary_lines(&checkpoint) {
                println!("  {line}");
            }
        }
        None if checkpoint_exists(run_dir) => {
            println!(
                "{} Checkpoint at {} is invalid or incompatible",
                "✗".red().bold(),
                path.display()
            );
        }
        None => {
            println!("{} No checkpoint in {}", "─".dimmed(), run_dir.display());
        }
    }

    Ok(())
}

/// Human-readable summary of a checkpoint, one field per line
pub fn summary_lines(checkpoint: &Checkpoint) -> Vec<String> {
    let tracer_keys: Vec<&str> = checkpoint.tracer_data.keys().map(String::as_str).collect();
    vec![
        format!("version:    {}", checkpoint.version),
        format!("created_at: {}", checkpoint.created_at.to_rfc3339()),
        format!("iteration:  {}", checkpoint.iteration()),
        format!("completed:  {}", checkpoint.is_completed()),
        format!("targets:    {}", checkpoint.target_count()),
        format!(
            "tracer:     {}",
            if tracer_keys.is_empty() {
                "-".to_string()
            } else {
                tracer_keys.join(", ")
            }
        ),
    ]
}
