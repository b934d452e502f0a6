//! Command handlers for asp-tier-sizer CLI
//!
//! Each submodule handles a specific CLI command.

pub mod completions;
pub mod init;
pub mod recommend;
pub mod report;
pub mod snapshot;
pub mod tiers;

// Re-export command functions for convenient access
pub use completions::cmd_completions;
pub use init::cmd_init;
pub use recommend::{cmd_recommend, parse_byte_count};
pub use report::{cmd_report, run_report, ReportOptions};
pub use snapshot::cmd_snapshot;
pub use tiers::cmd_tiers;
