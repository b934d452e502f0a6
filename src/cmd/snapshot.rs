//! Snapshot command implementation
//!
//! Handles the `asp-tier-sizer snapshot` command which captures every
//! processor's stats document through mongosh into a JSON file that
//! `report --from-file` can read later.

use anyhow::{Context, Result};
use console::style;
use log::debug;
use std::path::Path;

use crate::config::{ConfigLoader, Overrides, SettingsResolver};
use crate::error::TierSizerError;
use crate::fmt::CHECKMARK;
use crate::infra::{FileSystem, RealCommandExecutor, RealFileSystem};
use crate::source::{MongoshSource, ProcessorSource, Snapshot};
use crate::tools::Tool;

/// Capture processor stats from a live instance into `output`
pub fn cmd_snapshot(uri: Option<String>, output: &Path) -> Result<()> {
    let project_root = std::env::current_dir()?;
    let config = ConfigLoader::load(&project_root)?;
    let settings = SettingsResolver::resolve(
        &config,
        &Overrides {
            threshold: None,
            uri,
        },
    )?;

    let mongosh = Tool::new("mongosh", settings.mongosh_binary.as_str());
    mongosh.require()?;
    if log::log_enabled!(log::Level::Debug) {
        if let Ok(version) = mongosh.version() {
            debug!("using mongosh {}", version);
        }
    }

    let source = MongoshSource::with_executor(
        settings.mongosh_binary.as_str(),
        settings.uri.clone(),
        RealCommandExecutor,
    );
    let count = write_snapshot(&source, output, &RealFileSystem)?;

    println!(
        "{} Captured {} processor(s) to {}",
        CHECKMARK,
        count,
        style(output.display()).cyan()
    );
    Ok(())
}

/// Capture a snapshot from `source` and write it with `fs`
///
/// Returns the number of processors captured.
pub fn write_snapshot<S: ProcessorSource, FS: FileSystem>(
    source: &S,
    output: &Path,
    fs: &FS,
) -> Result<usize> {
    let snapshot = Snapshot::capture(source).context("Failed to list stream processors")?;
    let json = snapshot.to_json_pretty()?;

    fs.write(output, json).map_err(|source| TierSizerError::Io {
        context: format!("writing snapshot to {}", output.display()),
        source,
    })?;

    Ok(snapshot.processors.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{ProcessorInfo, ProcessorStats, SnapshotSource, SourceError};
    use serde_json::json;

    struct TwoProcessors;

    impl ProcessorSource for TwoProcessors {
        fn list_processors(&self) -> Result<Vec<ProcessorInfo>, SourceError> {
            Ok(vec![
                ProcessorInfo {
                    name: "ingest".to_string(),
                },
                ProcessorInfo {
                    name: "stopped".to_string(),
                },
            ])
        }

        fn processor_stats(&self, name: &str) -> Result<ProcessorStats, SourceError> {
            if name == "ingest" {
                Ok(ProcessorStats::from_document(
                    json!({"stats": {"memoryUsageBytes": 300_000_000u64}}),
                ))
            } else {
                Err(SourceError::StatsUnavailable(name.to_string()))
            }
        }
    }

    struct Unlistable;

    impl ProcessorSource for Unlistable {
        fn list_processors(&self) -> Result<Vec<ProcessorInfo>, SourceError> {
            Err(SourceError::EmptyOutput("mongosh".to_string()))
        }

        fn processor_stats(&self, name: &str) -> Result<ProcessorStats, SourceError> {
            Err(SourceError::StatsUnavailable(name.to_string()))
        }
    }

    #[test]
    fn test_write_snapshot_round_trips_through_snapshot_source() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("snapshot.json");

        let count = write_snapshot(&TwoProcessors, &path, &RealFileSystem).unwrap();
        assert_eq!(count, 2);

        let source = SnapshotSource::new(&path);
        let names: Vec<_> = source
            .list_processors()
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["ingest", "stopped"]);
        assert_eq!(
            source.processor_stats("ingest").unwrap().memory_usage_bytes(),
            Some(300_000_000)
        );
        assert!(source.processor_stats("stopped").is_err());
    }

    #[test]
    fn test_write_snapshot_listing_failure_writes_nothing() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("snapshot.json");

        let err = write_snapshot(&Unlistable, &path, &RealFileSystem).unwrap_err();
        assert!(err.to_string().contains("Failed to list"));
        assert!(!path.exists());
    }

    #[test]
    fn test_write_snapshot_io_failure_is_typed() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("missing-dir").join("snapshot.json");

        let err = write_snapshot(&TwoProcessors, &path, &RealFileSystem).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TierSizerError>(),
            Some(TierSizerError::Io { .. })
        ));
    }
}
