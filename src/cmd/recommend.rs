//! Recommend command implementation
//!
//! Handles the `asp-tier-sizer recommend <BYTES>` command which sizes a single
//! memory figure without contacting any processor.

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;
use std::env;

use crate::config::{ConfigLoader, Overrides, SettingsResolver};
use crate::fmt::{format_bytes, format_thousands, format_threshold_percent, CHART, CHECKMARK, WARNING};
use crate::tier::{recommend_tier, Recommendation};

/// Result of sizing a single figure, as printed by `--json`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecommendOutput {
    /// Sized memory figure
    pub memory_usage_bytes: u64,
    /// Threshold used
    pub threshold: f64,
    /// Chosen tier, `null` when the figure exceeds every tier
    pub recommendation: Option<Recommendation>,
}

/// Parse a byte count from the command line
///
/// Accepts plain integers with optional `,` or `_` digit separators and an
/// optional binary suffix (`K`, `M`, `G`, with or without `iB`/`B`).
///
/// # Examples
///
/// ```
/// use asp_tier_sizer::cmd::recommend::parse_byte_count;
///
/// assert_eq!(parse_byte_count("300,000,000").unwrap(), 300_000_000);
/// assert_eq!(parse_byte_count("512MiB").unwrap(), 536_870_912);
/// assert!(parse_byte_count("-1").is_err());
/// ```
pub fn parse_byte_count(input: &str) -> Result<u64, String> {
    let trimmed = input.trim();
    let digits_end = trimmed
        .find(|c: char| !(c.is_ascii_digit() || c == ',' || c == '_'))
        .unwrap_or(trimmed.len());
    let (number, suffix) = trimmed.split_at(digits_end);

    let digits: String = number.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err(format!("'{}' is not a byte count", input));
    }
    let value: u64 = digits
        .parse()
        .map_err(|_| format!("'{}' is too large", input))?;

    let multiplier: u64 = match suffix.trim().to_ascii_lowercase().as_str() {
        "" | "b" => 1,
        "k" | "kb" | "kib" => 1024,
        "m" | "mb" | "mib" => 1024 * 1024,
        "g" | "gb" | "gib" => 1024 * 1024 * 1024,
        other => return Err(format!("unknown size suffix '{}'", other)),
    };

    value
        .checked_mul(multiplier)
        .ok_or_else(|| format!("'{}' is too large", input))
}

/// Recommend a tier for a single memory figure
///
/// # Examples
///
/// ```no_run
/// use asp_tier_sizer::cmd::recommend::cmd_recommend;
///
/// cmd_recommend(300_000_000, None, false)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_recommend(memory_usage_bytes: u64, threshold: Option<f64>, json: bool) -> Result<()> {
    let project_root = env::current_dir()?;
    let config = ConfigLoader::load(&project_root)?;
    let settings = SettingsResolver::resolve(
        &config,
        &Overrides {
            threshold,
            uri: None,
        },
    )?;

    let output = RecommendOutput {
        memory_usage_bytes,
        threshold: settings.threshold,
        recommendation: recommend_tier(memory_usage_bytes, &settings.tiers, settings.threshold),
    };

    if json {
        let rendered =
            serde_json::to_string_pretty(&output).context("Failed to serialize recommendation")?;
        println!("{}", rendered);
        return Ok(());
    }

    println!(
        "{} {} bytes ({}) at <= {}% usage",
        CHART,
        style(format_thousands(memory_usage_bytes)).bold(),
        format_bytes(memory_usage_bytes),
        format_threshold_percent(settings.threshold)
    );

    match &output.recommendation {
        Some(rec) => println!(
            "{} Recommended tier: {} ({}), {:.1}% used",
            CHECKMARK,
            style(&rec.tier_name).green().bold(),
            format_bytes(rec.tier_capacity_bytes),
            rec.percent_used
        ),
        None => {
            let largest = settings
                .tiers
                .largest()
                .map(|t| t.name.as_str())
                .unwrap_or("largest tier");
            println!(
                "{} {}",
                WARNING,
                style(format!("No suitable tier (Larger than {})", largest)).yellow()
            );
        }
    }

    Ok(())
}
