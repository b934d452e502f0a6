//! Comma-delimited text rendering of a tier report

use super::{ReportRow, RowOutcome, TierReport};
use crate::fmt::{format_thousands, format_threshold_percent};

/// Separator line printed under the title
pub const SEPARATOR: &str = "-------------------------------------------------";

/// Column header line
pub const COLUMN_HEADER: &str = "Processor, Recommended Tier, Memory Usage, % Used of Tier";

const NO_STATS: &str = "No stats available";
const NOT_AVAILABLE: &str = "N/A";

/// Title line stating the configured threshold
///
/// # Examples
///
/// ```
/// use asp_tier_sizer::report::text::title_line;
///
/// assert_eq!(
///     title_line(0.70),
///     "Stream Processor Memory & Tier Recommendations (Targeting <= 70% usage):"
/// );
/// ```
pub fn title_line(threshold: f64) -> String {
    format!(
        "Stream Processor Memory & Tier Recommendations (Targeting <= {}% usage):",
        format_threshold_percent(threshold)
    )
}

/// Render one processor row
pub fn render_row(row: &ReportRow, largest_tier: &str) -> String {
    let usage = row
        .memory_usage_bytes
        .map(|bytes| format!("{} bytes", format_thousands(bytes)));

    match (&row.outcome, usage) {
        (RowOutcome::Recommended(rec), Some(usage)) => format!(
            "{}, {}, {}, {:.1}%",
            row.processor, rec.tier_name, usage, rec.percent_used
        ),
        (RowOutcome::NoSuitableTier, Some(usage)) => format!(
            "{}, No suitable tier (Larger than {}), {}, {}",
            row.processor, largest_tier, usage, NOT_AVAILABLE
        ),
        _ => format!(
            "{}, {}, {}, {}",
            row.processor, NO_STATS, NOT_AVAILABLE, NOT_AVAILABLE
        ),
    }
}

impl TierReport {
    /// Render the full text report, one line per processor after the header
    pub fn render_text(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 3);
        lines.push(title_line(self.threshold));
        lines.push(SEPARATOR.to_string());
        lines.push(COLUMN_HEADER.to_string());
        lines.extend(
            self.rows
                .iter()
                .map(|row| render_row(row, &self.largest_tier)),
        );

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}
