use anyhow::Result;
use clap::Parser;
use scan_checkpoint::logging::init_logging;

mod cli;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let code = cli::dispatch(cli)?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
