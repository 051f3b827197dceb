pub mod checkpoints;
pub mod commands;
pub mod config;
pub mod fs;
pub mod logging;

pub use checkpoints::{
    AgentSnapshot, Checkpoint, CheckpointError, CheckpointStore, ResumeDecision, ScanConfig,
    CHECKPOINT_VERSION,
};
pub use config::StoreConfig;
