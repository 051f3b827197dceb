//! Integration tests for the checkpoint store
//!
//! These tests exercise the public store API against real run directories:
//! lifecycle, validation gates, resume compatibility and crash safety.

pub mod resume_compat;
pub mod store_lifecycle;
