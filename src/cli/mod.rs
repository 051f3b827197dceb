mod dispatch;
mod types;

pub use dispatch::dispatch;
pub use types::Cli;
