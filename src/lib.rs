#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! asp-tier-sizer library
//!
//! This library recommends the smallest stream processing tier whose
//! capacity keeps each processor's memory usage at or below a target share
//! (70% by default). It can be used programmatically in addition to the CLI
//! interface.
//!
//! # Basic Example
//!
//! Sizing a single memory figure against the built-in tiers:
//!
//! ```
//! use asp_tier_sizer::tier::{recommend_tier, TierTable, DEFAULT_THRESHOLD};
//!
//! let tiers = TierTable::default();
//! let rec = recommend_tier(400_000_000, &tiers, DEFAULT_THRESHOLD).unwrap();
//!
//! assert_eq!(rec.tier_name, "SP5");
//! assert_eq!(rec.percent_used, 37.3);
//! ```
//!
//! # Advanced Example: Offline Report
//!
//! Building a full report from a captured snapshot:
//!
//! ```
//! use asp_tier_sizer::report::{collect_usage_samples, list_processor_names, TierReport};
//! use asp_tier_sizer::source::SnapshotSource;
//! use asp_tier_sizer::tier::TierTable;
//! use std::fs;
//! use tempfile::TempDir;
//!
//! let dir = TempDir::new().unwrap();
//! let path = dir.path().join("snapshot.json");
//! fs::write(
//!     &path,
//!     r#"{"processors": [
//!         {"name": "orders", "stats": {"stats": {"memoryUsageBytes": 300000000}}},
//!         {"name": "paused", "stats": null}
//!     ]}"#,
//! )
//! .unwrap();
//!
//! let source = SnapshotSource::new(&path);
//! let names = list_processor_names(&source);
//! let samples = collect_usage_samples(&source, &names);
//! let report = TierReport::build(samples, &TierTable::default(), 0.7);
//!
//! let text = report.render_text();
//! assert!(text.contains("orders, SP2, 300,000,000 bytes, 55.9%"));
//! assert!(text.contains("paused, No stats available, N/A, N/A"));
//! ```

/// Command handlers for CLI operations
pub mod cmd;
/// Configuration file loading and settings resolution
pub mod config;
/// Enhanced error types with contextual suggestions
pub mod error;
/// Shared formatting utilities
pub mod fmt;
/// Infrastructure traits for filesystem and command execution
pub mod infra;
/// Per-processor usage collection and report rendering
pub mod report;
/// Stream processor listing and statistics sources
pub mod source;
/// Tier table and tier recommendation
pub mod tier;
/// Tool detection and version checking
pub mod tools;
