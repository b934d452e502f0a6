//! Stream processor inventory and statistics collaborators
//!
//! A [`ProcessorSource`] lists the processors of a stream processing
//! instance and fetches per-processor statistics. Two implementations exist:
//! - [`MongoshSource`] shells out to `mongosh` against a live instance
//! - [`SnapshotSource`] reads a previously captured JSON snapshot

pub mod memory;
pub mod mongosh;
pub mod snapshot;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use memory::MemoryUsage;
pub use mongosh::MongoshSource;
pub use snapshot::{Snapshot, SnapshotEntry, SnapshotSource};

/// Errors raised by a processor source
#[derive(Error, Debug)]
pub enum SourceError {
    /// I/O error while running a command or reading a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// External command exited unsuccessfully
    #[error("{program} exited with status {code}: {stderr}")]
    CommandFailed {
        /// Program that was run
        program: String,
        /// Exit code (-1 when terminated by a signal)
        code: i32,
        /// Captured standard error
        stderr: String,
    },

    /// Command output was not valid UTF-8
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Output could not be parsed as the expected JSON
    #[error("invalid JSON from {context}: {source}")]
    Json {
        /// What was being parsed
        context: String,
        #[source]
        /// Parse error
        source: serde_json::Error,
    },

    /// Command produced no output
    #[error("no output from {0}")]
    EmptyOutput(String),

    /// The processor has no statistics capability or no recorded stats
    #[error("no statistics available for processor '{0}'")]
    StatsUnavailable(String),

    /// The stats call for one processor raised an error on the instance
    #[error("stats for processor '{processor}' failed: {message}")]
    Remote {
        /// Processor name
        processor: String,
        /// Error text reported by the instance
        message: String,
    },
}

impl SourceError {
    /// Get actionable suggestion for resolving this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use asp_tier_sizer::source::SourceError;
    ///
    /// let error = SourceError::CommandFailed {
    ///     program: "mongosh".to_string(),
    ///     code: 1,
    ///     stderr: "MongoServerSelectionError".to_string(),
    /// };
    /// assert!(error.suggestion().contains("--uri"));
    /// ```
    pub fn suggestion(&self) -> String {
        match self {
            Self::Io(_) => {
                "Check that mongosh runs from this shell: mongosh --version".to_string()
            }
            Self::CommandFailed { program, .. } => format!(
                "Check the --uri connection string and that {} can authenticate with \
                 permission to list stream processors",
                program
            ),
            Self::Utf8(_) | Self::Json { .. } | Self::EmptyOutput(_) => {
                "Re-run with RUST_LOG=debug to see the raw mongosh output".to_string()
            }
            Self::StatsUnavailable(name) | Self::Remote { processor: name, .. } => format!(
                "Start processor '{}' or capture a snapshot once it has reported stats",
                name
            ),
        }
    }

    /// Get appropriate exit code for this error.
    ///
    /// Every source failure means the instance could not be read.
    pub fn exit_code(&self) -> i32 {
        69 // EX_UNAVAILABLE
    }
}

/// One entry of the processor listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorInfo {
    /// Processor name
    pub name: String,
}

/// Statistics document for one processor
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessorStats {
    /// Raw statistics document as returned by the platform
    pub document: Value,
    /// Decoded `stats.memoryUsageBytes`, if present in a supported shape
    pub memory_usage: Option<MemoryUsage>,
}

impl ProcessorStats {
    /// Decode a statistics document
    ///
    /// The memory usage lives at `stats.memoryUsageBytes`; a missing field or
    /// an unsupported value leaves `memory_usage` empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use asp_tier_sizer::source::{MemoryUsage, ProcessorStats};
    /// use serde_json::json;
    ///
    /// let stats = ProcessorStats::from_document(json!({
    ///     "ok": 1,
    ///     "stats": { "memoryUsageBytes": 2048 }
    /// }));
    /// assert_eq!(stats.memory_usage, Some(MemoryUsage::Native(2048.0)));
    /// ```
    pub fn from_document(document: Value) -> Self {
        let memory_usage = document
            .get("stats")
            .and_then(|stats| stats.get("memoryUsageBytes"))
            .and_then(MemoryUsage::from_value);

        Self {
            document,
            memory_usage,
        }
    }

    /// Memory usage normalized to bytes
    pub fn memory_usage_bytes(&self) -> Option<u64> {
        self.memory_usage.as_ref().and_then(MemoryUsage::to_bytes)
    }
}

/// Listing and statistics collaborator for stream processors
pub trait ProcessorSource {
    /// List all processors in listing order
    fn list_processors(&self) -> Result<Vec<ProcessorInfo>, SourceError>;

    /// Fetch the statistics document for one processor
    fn processor_stats(&self, name: &str) -> Result<ProcessorStats, SourceError>;

    /// Fetch statistics for several processors, one result per name in order
    ///
    /// The default calls [`processor_stats`](Self::processor_stats) per name.
    /// Sources with a per-call cost fetch everything at once.
    fn processor_stats_batch(&self, names: &[String]) -> Vec<Result<ProcessorStats, SourceError>> {
        names.iter().map(|name| self.processor_stats(name)).collect()
    }
}
