pub mod atomic;
pub mod checkpoints;

pub use atomic::write_atomic;
pub use checkpoints::{
    checkpoint_exists, checkpoint_path, is_checkpoint_temp, read_checkpoint, remove_checkpoint,
    write_checkpoint,
};
