//! Common test utilities and helpers
//!
//! This module provides shared functionality for integration tests:
//! - Snapshot and config fixture creation
//! - A handle on the compiled binary

pub mod fixtures;

use assert_cmd::Command;

/// Helper to get the asp-tier-sizer binary command
#[allow(dead_code)]
pub fn get_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_asp-tier-sizer"))
}
