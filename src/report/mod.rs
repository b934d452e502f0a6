//! Per-processor usage collection and tier report
//!
//! Stats for all listed processors are requested in one batch and matched
//! back by listing order. A failure for one processor only affects that
//! processor's row; a listing failure yields an empty report.

pub mod json;
pub mod text;

use log::{debug, error, warn};
use serde::Serialize;

use crate::source::{ProcessorSource, ProcessorStats, SourceError};
use crate::tier::{recommend_tier, Recommendation, TierTable};

pub use json::{JsonReport, JsonRow};

/// Memory usage observed for one processor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageSample {
    /// Processor name
    pub processor_name: String,
    /// Usage in bytes, `None` when no usable stats were available
    pub memory_usage_bytes: Option<u64>,
}

/// List processor names, degrading to an empty list on failure
pub fn list_processor_names<S: ProcessorSource>(source: &S) -> Vec<String> {
    match source.list_processors() {
        Ok(processors) => {
            debug!("listed {} stream processors", processors.len());
            processors.into_iter().map(|p| p.name).collect()
        }
        Err(e) => {
            error!("Failed to list stream processors: {}", e);
            Vec::new()
        }
    }
}

/// Turn one processor's stats result into a usage sample
///
/// Any stats failure or unusable memory value yields a sample without usage.
pub fn usage_sample(name: &str, stats: Result<ProcessorStats, SourceError>) -> UsageSample {
    let memory_usage_bytes = match stats {
        Ok(stats) => {
            let bytes = stats.memory_usage_bytes();
            if bytes.is_none() {
                warn!("processor '{}' reported no usable memoryUsageBytes", name);
            }
            bytes
        }
        Err(e) => {
            warn!("stats unavailable for processor '{}': {}", name, e);
            None
        }
    };

    UsageSample {
        processor_name: name.to_string(),
        memory_usage_bytes,
    }
}

/// Fetch memory usage for every named processor, in order
///
/// # Examples
///
/// ```
/// use asp_tier_sizer::report::collect_usage_samples;
/// use asp_tier_sizer::source::{ProcessorInfo, ProcessorSource, ProcessorStats, SourceError};
/// use serde_json::json;
///
/// struct Fixed;
///
/// impl ProcessorSource for Fixed {
///     fn list_processors(&self) -> Result<Vec<ProcessorInfo>, SourceError> {
///         Ok(vec![])
///     }
///
///     fn processor_stats(&self, name: &str) -> Result<ProcessorStats, SourceError> {
///         match name {
///             "ok" => Ok(ProcessorStats::from_document(json!({"stats": {"memoryUsageBytes": 10}}))),
///             _ => Err(SourceError::StatsUnavailable(name.to_string())),
///         }
///     }
/// }
///
/// let samples = collect_usage_samples(&Fixed, &["ok".to_string(), "broken".to_string()]);
/// assert_eq!(samples[0].memory_usage_bytes, Some(10));
/// assert_eq!(samples[1].memory_usage_bytes, None);
/// ```
pub fn collect_usage_samples<S: ProcessorSource>(source: &S, names: &[String]) -> Vec<UsageSample> {
    let mut results = source.processor_stats_batch(names).into_iter();
    names
        .iter()
        .map(|name| {
            let stats = results
                .next()
                .unwrap_or_else(|| Err(SourceError::StatsUnavailable(name.clone())));
            usage_sample(name, stats)
        })
        .collect()
}

/// Outcome of sizing one processor
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    /// A tier fits within the threshold
    Recommended(Recommendation),
    /// Usage exceeds the threshold share of the largest tier
    NoSuitableTier,
    /// Stats could not be obtained
    Unavailable,
}

/// One report line
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    /// Processor name
    pub processor: String,
    /// Observed usage in bytes
    pub memory_usage_bytes: Option<u64>,
    /// Sizing outcome
    pub outcome: RowOutcome,
}

impl ReportRow {
    /// Size a single sample against the tier table
    pub fn from_sample(sample: UsageSample, tiers: &TierTable, threshold: f64) -> Self {
        let outcome = match sample.memory_usage_bytes {
            Some(bytes) => match recommend_tier(bytes, tiers, threshold) {
                Some(rec) => RowOutcome::Recommended(rec),
                None => RowOutcome::NoSuitableTier,
            },
            None => RowOutcome::Unavailable,
        };

        Self {
            processor: sample.processor_name,
            memory_usage_bytes: sample.memory_usage_bytes,
            outcome,
        }
    }
}

/// Tier recommendations for a set of processors
#[derive(Debug, Clone, PartialEq)]
pub struct TierReport {
    /// Threshold used for the recommendations
    pub threshold: f64,
    /// Name of the largest configured tier
    pub largest_tier: String,
    /// Rows in listing order
    pub rows: Vec<ReportRow>,
}

impl TierReport {
    /// Build a report from collected samples
    pub fn build(samples: Vec<UsageSample>, tiers: &TierTable, threshold: f64) -> Self {
        let rows = samples
            .into_iter()
            .map(|sample| ReportRow::from_sample(sample, tiers, threshold))
            .collect();

        Self {
            threshold,
            largest_tier: tiers
                .largest()
                .map(|t| t.name.clone())
                .unwrap_or_default(),
            rows,
        }
    }

    /// Processors whose usage exceeds every tier
    pub fn oversized(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|row| row.outcome == RowOutcome::NoSuitableTier)
            .map(|row| row.processor.as_str())
            .collect()
    }

    /// Number of processors without usable stats
    pub fn unavailable_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| row.outcome == RowOutcome::Unavailable)
            .count()
    }
}
