use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scan-checkpoint")]
#[command(about = "Inspect and manage scan run checkpoints", long_about = None)]
#[command(version)]
#[command(subcommand_help_heading = "Commands")]
pub struct Cli {
    /// Store config file (default: <config dir>/scan-checkpoint/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a summary of the checkpoint in a run directory
    Inspect {
        /// Run directory holding checkpoint.json
        run_dir: PathBuf,
    },

    /// Check whether a run can be resumed (exit code 1 if not)
    Resume {
        /// Run directory holding checkpoint.json
        run_dir: PathBuf,

        /// JSON file with the scan configuration of the new attempt
        #[arg(long)]
        scan_config: PathBuf,
    },

    /// Write a checkpoint from JSON files
    Save {
        /// Run directory (created if missing)
        run_dir: PathBuf,

        /// JSON file with the serialized agent state
        #[arg(long)]
        agent_state: PathBuf,

        /// JSON file with the scan configuration
        #[arg(long)]
        scan_config: PathBuf,

        /// JSON file with tracer metadata
        #[arg(long)]
        tracer_data: Option<PathBuf>,
    },

    /// Delete the checkpoint of a run
    Delete {
        /// Run directory holding checkpoint.json
        run_dir: PathBuf,
    },
}
