//! Snapshot-file processor source
//!
//! A snapshot captures the processor listing and each processor's raw stats
//! document so sizing can be re-run offline:
//!
//! ```json
//! {
//!   "processors": [
//!     { "name": "ingest", "stats": { "stats": { "memoryUsageBytes": 300000000 } } },
//!     { "name": "stopped", "stats": null }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cell::OnceCell;
use std::path::PathBuf;

use super::{ProcessorInfo, ProcessorSource, ProcessorStats, SourceError};
use crate::infra::{FileSystem, RealFileSystem};

/// Captured processor listing with raw statistics documents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Processors in listing order
    #[serde(default)]
    pub processors: Vec<SnapshotEntry>,
}

/// One processor in a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    /// Processor name
    pub name: String,
    /// Raw stats document, `null` when stats could not be fetched
    #[serde(default)]
    pub stats: Option<Value>,
}

impl Snapshot {
    /// Capture a snapshot from another source
    ///
    /// Stats failures are recorded as `null` entries; a listing failure is
    /// returned to the caller.
    pub fn capture<S: ProcessorSource>(source: &S) -> Result<Self, SourceError> {
        let names: Vec<String> = source
            .list_processors()?
            .into_iter()
            .map(|info| info.name)
            .collect();
        let mut results = source.processor_stats_batch(&names).into_iter();

        let processors = names
            .into_iter()
            .map(|name| {
                let stats = match results.next() {
                    Some(Ok(stats)) => Some(stats.document),
                    Some(Err(e)) => {
                        log::warn!("no stats captured for '{}': {}", name, e);
                        None
                    }
                    None => {
                        log::warn!("no stats captured for '{}'", name);
                        None
                    }
                };
                SnapshotEntry { name, stats }
            })
            .collect();

        Ok(Self { processors })
    }

    /// Serialize as pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String, SourceError> {
        serde_json::to_string_pretty(self).map_err(|source| SourceError::Json {
            context: "snapshot".to_string(),
            source,
        })
    }
}

/// Processor source backed by a snapshot file
///
/// The file is read on first use and cached for subsequent calls.
pub struct SnapshotSource<FS: FileSystem = RealFileSystem> {
    path: PathBuf,
    fs: FS,
    snapshot: OnceCell<Snapshot>,
}

impl SnapshotSource<RealFileSystem> {
    /// Create a source reading `path` from disk
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_fs(path, RealFileSystem)
    }
}

impl<FS: FileSystem> SnapshotSource<FS> {
    /// Create a source with a custom filesystem implementation
    pub fn with_fs(path: impl Into<PathBuf>, fs: FS) -> Self {
        Self {
            path: path.into(),
            fs,
            snapshot: OnceCell::new(),
        }
    }

    fn snapshot(&self) -> Result<&Snapshot, SourceError> {
        if let Some(snapshot) = self.snapshot.get() {
            return Ok(snapshot);
        }

        let contents = self.fs.read_to_string(&self.path)?;
        let parsed: Snapshot =
            serde_json::from_str(&contents).map_err(|source| SourceError::Json {
                context: self.path.display().to_string(),
                source,
            })?;

        Ok(self.snapshot.get_or_init(|| parsed))
    }
}

impl<FS: FileSystem> ProcessorSource for SnapshotSource<FS> {
    fn list_processors(&self) -> Result<Vec<ProcessorInfo>, SourceError> {
        Ok(self
            .snapshot()?
            .processors
            .iter()
            .map(|entry| ProcessorInfo {
                name: entry.name.clone(),
            })
            .collect())
    }

    fn processor_stats(&self, name: &str) -> Result<ProcessorStats, SourceError> {
        let document = self
            .snapshot()?
            .processors
            .iter()
            .find(|entry| entry.name == name)
            .and_then(|entry| entry.stats.clone())
            .filter(|stats| !stats.is_null())
            .ok_or_else(|| SourceError::StatsUnavailable(name.to_string()))?;

        Ok(ProcessorStats::from_document(document))
    }
}
