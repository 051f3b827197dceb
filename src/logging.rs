//! Tracing subscriber setup for the CLI
//!
//! The library only emits `tracing` events; installing a subscriber is the
//! binary's job.

use tracing_subscriber::EnvFilter;

/// Install a stderr fmt subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `info`, or `debug` when verbose.
/// Calling this more than once is harmless.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
