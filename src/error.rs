//! Enhanced error types with contextual suggestions
//!
//! Provides structured error types that include:
//! - Actionable error messages
//! - Suggested fixes and recovery actions
//! - Documentation links
//! - Proper exit codes for CI/CD
//!
//! Per-processor stats failures never reach this module; the report recovers
//! them as rows. A [`SourceError`] only surfaces here when a whole command
//! depends on the instance, as `snapshot` does on the listing.

use std::path::PathBuf;
use thiserror::Error;

use crate::source::SourceError;
use crate::tier::TierTableError;

/// Enhanced asp-tier-sizer errors with contextual suggestions
#[derive(Error, Debug)]
pub enum TierSizerError {
    /// Required tool is not installed
    #[error("Tool not installed: {tool}")]
    ToolMissing {
        /// Tool name
        tool: String,
        /// Installation hint
        install_hint: String,
        /// Optional documentation URL
        docs_url: Option<String>,
    },

    /// Configuration file has an invalid threshold or tier table
    #[error("Invalid configuration in {path}")]
    InvalidConfig {
        /// Path to config file
        path: PathBuf,
        #[source]
        /// Validation failure
        source: TierTableError,
    },

    /// Threshold given on the command line is out of range
    #[error("Invalid threshold: {value}")]
    InvalidThreshold {
        /// Rejected value
        value: f64,
    },

    /// Configuration file already exists
    #[error("Configuration file already exists: {path}")]
    ConfigExists {
        /// Existing file
        path: PathBuf,
    },

    /// Snapshot file not found
    #[error("Snapshot file not found: {path}")]
    SnapshotNotFound {
        /// Missing snapshot path
        path: PathBuf,
    },

    /// One or more processors exceed the largest tier
    #[error("{} processor(s) exceed the largest tier ({largest_tier}): {}", .processors.len(), .processors.join(", "))]
    NoSuitableTier {
        /// Oversized processors
        processors: Vec<String>,
        /// Largest configured tier
        largest_tier: String,
    },

    /// Generic I/O error with context
    #[error("I/O error: {context}")]
    Io {
        /// Context about where the error occurred
        context: String,
        #[source]
        /// IO error source
        source: std::io::Error,
    },
}

impl TierSizerError {
    /// Get actionable suggestion for resolving this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use asp_tier_sizer::error::TierSizerError;
    ///
    /// let error = TierSizerError::ToolMissing {
    ///     tool: "mongosh".to_string(),
    ///     install_hint: "brew install mongosh".to_string(),
    ///     docs_url: None,
    /// };
    ///
    /// let suggestion = error.suggestion();
    /// assert!(suggestion.is_some());
    /// assert!(suggestion.unwrap().contains("brew install"));
    /// ```
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::ToolMissing { install_hint, .. } => Some(format!(
                "Install with: {}\nOr run offline with: asp-tier-sizer report --from-file <snapshot.json>",
                install_hint
            )),
            Self::InvalidConfig { source, .. } => Some(match source {
                TierTableError::ThresholdOutOfRange(_) => {
                    "Set threshold to a fraction between 0 (exclusive) and 1, e.g. 0.7".to_string()
                }
                TierTableError::NotAscending { .. } => {
                    "List [[tiers]] entries from smallest to largest capacity".to_string()
                }
                _ => "Fix the [[tiers]] table or delete it to use the built-in tiers".to_string(),
            }),
            Self::InvalidThreshold { .. } => Some(
                "Pass --threshold as a fraction between 0 (exclusive) and 1, e.g. --threshold 0.7"
                    .to_string(),
            ),
            Self::ConfigExists { .. } => {
                Some("Edit the existing file or re-run with --force to overwrite it".to_string())
            }
            Self::SnapshotNotFound { .. } => Some(
                "Capture one first with: asp-tier-sizer snapshot --output <snapshot.json>"
                    .to_string(),
            ),
            Self::NoSuitableTier { largest_tier, .. } => Some(format!(
                "Usage is above the threshold share of {}. Consider:\n  \
                     - Splitting the pipeline across several processors\n  \
                     - Reducing window sizes or state held by $lookup/$group stages\n  \
                     - Raising the threshold if the headroom is intentional",
                largest_tier
            )),
            Self::Io { context, .. } => Some(format!(
                "Check file permissions and that {} is accessible",
                context
            )),
        }
    }

    /// Get documentation URL for this error.
    pub fn docs_url(&self) -> Option<&str> {
        match self {
            Self::ToolMissing { docs_url, .. } => docs_url.as_deref(),
            _ => None,
        }
    }

    /// Get appropriate exit code for this error.
    ///
    /// Returns Unix-style exit codes based on the error type, following sysexits.h conventions.
    ///
    /// # Examples
    ///
    /// ```
    /// use asp_tier_sizer::error::TierSizerError;
    ///
    /// let error = TierSizerError::ToolMissing {
    ///     tool: "mongosh".to_string(),
    ///     install_hint: "npm install -g mongosh".to_string(),
    ///     docs_url: None,
    /// };
    /// assert_eq!(error.exit_code(), 127); // Command not found
    ///
    /// let oversized = TierSizerError::NoSuitableTier {
    ///     processors: vec!["ingest".to_string()],
    ///     largest_tier: "SP50".to_string(),
    /// };
    /// assert_eq!(oversized.exit_code(), 1); // Generic error for CI failure
    /// ```
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ToolMissing { .. } => 127,     // Command not found (Unix convention)
            Self::InvalidConfig { .. } => 65,    // EX_DATAERR
            Self::InvalidThreshold { .. } => 64, // EX_USAGE
            Self::ConfigExists { .. } => 73,     // EX_CANTCREAT
            Self::SnapshotNotFound { .. } => 66, // EX_NOINPUT
            Self::NoSuitableTier { .. } => 1,    // Generic error (CI should fail)
            Self::Io { .. } => 74,               // EX_IOERR
        }
    }
}

/// Error formatter with colors and structured output
///
/// Help text comes from the first [`TierSizerError`] or [`SourceError`] found
/// in the chain, so a mongosh failure wrapped in `anyhow` context still gets
/// its connection hint.
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with suggestions and documentation links
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = format!("{} {}\n", style("error:").red().bold(), error);

        for (depth, cause) in error.chain().skip(1).enumerate() {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(depth + 1),
                style("caused by:").yellow(),
                cause
            ));
        }

        if let Some(suggestion) = Self::suggestion(error) {
            output.push_str(&format!("\n{} {}\n", style("help:").cyan().bold(), suggestion));
        }

        if let Some(docs) = Self::tier_sizer_error(error).and_then(TierSizerError::docs_url) {
            output.push_str(&format!("{} {}\n", style("docs:").blue(), docs));
        }

        output
    }

    /// Get exit code from error
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        if let Some(ts_error) = Self::tier_sizer_error(error) {
            ts_error.exit_code()
        } else if let Some(source_error) = Self::source_error(error) {
            source_error.exit_code()
        } else {
            1 // Generic error
        }
    }

    fn suggestion(error: &anyhow::Error) -> Option<String> {
        match Self::tier_sizer_error(error) {
            Some(ts_error) => ts_error.suggestion(),
            None => Self::source_error(error).map(SourceError::suggestion),
        }
    }

    fn tier_sizer_error(error: &anyhow::Error) -> Option<&TierSizerError> {
        error.chain().find_map(|cause| cause.downcast_ref::<TierSizerError>())
    }

    fn source_error(error: &anyhow::Error) -> Option<&SourceError> {
        error.chain().find_map(|cause| cause.downcast_ref::<SourceError>())
    }
}
