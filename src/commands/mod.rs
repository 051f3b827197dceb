pub mod checkpoint;
pub mod clean;
pub mod common;
pub mod inspect;
pub mod resume;
