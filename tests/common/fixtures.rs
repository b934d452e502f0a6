//! Test fixture helpers for snapshot files and configuration
//!
//! Every fixture lives in its own [`TempDir`], which doubles as the working
//! directory so each test sees only its own `.asp-tier-sizer.toml`.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Snapshot covering every report row kind
///
/// - `ingest`: native number, fits SP2
/// - `wrapped`: `$numberLong` value, fits SP5
/// - `paused`: no stats
/// - `huge`: larger than every tier at 70%
pub const MIXED_SNAPSHOT: &str = r#"{
  "processors": [
    { "name": "ingest", "stats": { "ok": 1, "stats": { "memoryUsageBytes": 300000000 } } },
    { "name": "wrapped", "stats": { "ok": 1, "stats": { "memoryUsageBytes": { "$numberLong": "400000000" } } } },
    { "name": "paused", "stats": null },
    { "name": "huge", "stats": { "ok": 1, "stats": { "memoryUsageBytes": 30000000000 } } }
  ]
}"#;

/// Snapshot where every processor fits a tier
pub const FITTING_SNAPSHOT: &str = r#"{
  "processors": [
    { "name": "small", "stats": { "stats": { "memoryUsageBytes": 0 } } },
    { "name": "large", "stats": { "stats": { "memoryUsageBytes": 20000000000 } } }
  ]
}"#;

/// Creates a working directory holding `snapshot.json` with `contents`
///
/// # Returns
///
/// A tuple of (TempDir, PathBuf to the snapshot) - the TempDir must be kept alive
pub fn snapshot_dir(contents: &str) -> anyhow::Result<(TempDir, PathBuf)> {
    let temp_dir = TempDir::new()?;
    let snapshot = temp_dir.path().join("snapshot.json");
    fs::write(&snapshot, contents)?;
    Ok((temp_dir, snapshot))
}

/// Writes `.asp-tier-sizer.toml` into `dir`
pub fn write_config(dir: &TempDir, contents: &str) -> anyhow::Result<PathBuf> {
    let path = dir.path().join(".asp-tier-sizer.toml");
    fs::write(&path, contents)?;
    Ok(path)
}
