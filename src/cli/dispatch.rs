use anyhow::Result;
use scan_checkpoint::commands::{checkpoint, clean, common, inspect, resume};

use super::types::{Cli, Commands};

/// Run the selected command. Returns the process exit code.
pub fn dispatch(cli: Cli) -> Result<i32> {
    let store = common::open_store(cli.config.as_deref())?;

    match cli.command {
        Commands::Inspect { run_dir } => inspect::execute(&store, &run_dir).map(|()| 0),
        Commands::Resume {
            run_dir,
            scan_config,
        } => {
            let decision = resume::execute(&store, &run_dir, &scan_config)?;
            Ok(if decision.is_resumable() { 0 } else { 1 })
        }
        Commands::Save {
            run_dir,
            agent_state,
            scan_config,
            tracer_data,
        } => checkpoint::execute(
            &store,
            &run_dir,
            &agent_state,
            &scan_config,
            tracer_data.as_deref(),
        )
        .map(|()| 0),
        Commands::Delete { run_dir } => clean::execute(&store, &run_dir).map(|()| 0),
    }
}
