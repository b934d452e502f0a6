//! JSON output for automation

use serde::{Deserialize, Serialize};

use super::{ReportRow, RowOutcome, TierReport};
use crate::fmt::format_threshold_percent;

/// JSON report structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    /// Threshold fraction used for recommendations
    pub threshold: f64,
    /// Threshold as a display percentage (e.g. "70")
    pub threshold_percent: String,
    /// One entry per processor, in listing order
    pub rows: Vec<JsonRow>,
}

/// One processor in the JSON report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRow {
    /// Processor name
    pub processor: String,
    /// "recommended", "no_suitable_tier" or "unavailable"
    pub status: String,
    /// Recommended tier name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    /// Recommended tier capacity in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier_capacity_bytes: Option<u64>,
    /// Observed memory usage in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_usage_bytes: Option<u64>,
    /// Usage as a percentage of the recommended tier, one decimal place
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_used: Option<f64>,
}

impl JsonRow {
    /// Convert from a report row
    pub fn from_row(row: &ReportRow) -> Self {
        let (status, tier, tier_capacity_bytes, percent_used) = match &row.outcome {
            RowOutcome::Recommended(rec) => (
                "recommended",
                Some(rec.tier_name.clone()),
                Some(rec.tier_capacity_bytes),
                Some(rec.percent_used),
            ),
            RowOutcome::NoSuitableTier => ("no_suitable_tier", None, None, None),
            RowOutcome::Unavailable => ("unavailable", None, None, None),
        };

        Self {
            processor: row.processor.clone(),
            status: status.to_string(),
            tier,
            tier_capacity_bytes,
            memory_usage_bytes: row.memory_usage_bytes,
            percent_used,
        }
    }
}

impl JsonReport {
    /// Convert from a tier report
    pub fn from_report(report: &TierReport) -> Self {
        Self {
            threshold: report.threshold,
            threshold_percent: format_threshold_percent(report.threshold),
            rows: report.rows.iter().map(JsonRow::from_row).collect(),
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
