//! Tiers command implementation
//!
//! Handles the `asp-tier-sizer tiers` command which prints the effective tier
//! table along with the largest usage each tier accepts at the threshold.

use anyhow::Result;
use console::style;
use std::env;

use crate::config::{ConfigLoader, Overrides, SettingsResolver};
use crate::fmt::{format_bytes, format_thousands, format_threshold_percent, INFO};
use crate::tier::TierTable;

/// One printed line of the tier table
#[derive(Debug, Clone, PartialEq)]
pub struct TierLine {
    /// Tier name
    pub name: String,
    /// Capacity in bytes
    pub capacity_bytes: u64,
    /// Largest usage accepted at the threshold, truncated to whole bytes
    pub max_usage_bytes: u64,
}

/// Compute the lines shown by `tiers`
pub fn tier_lines(tiers: &TierTable, threshold: f64) -> Vec<TierLine> {
    tiers
        .into_iter()
        .map(|tier| TierLine {
            name: tier.name.clone(),
            capacity_bytes: tier.capacity_bytes,
            max_usage_bytes: tier.usage_ceiling(threshold).floor() as u64,
        })
        .collect()
}

/// Print the effective tier table
pub fn cmd_tiers(threshold: Option<f64>) -> Result<()> {
    let project_root = env::current_dir()?;
    let config = ConfigLoader::load(&project_root)?;
    let settings = SettingsResolver::resolve(
        &config,
        &Overrides {
            threshold,
            uri: None,
        },
    )?;

    println!(
        "{}  {} (targeting <= {}% usage)",
        INFO,
        style("Stream processing tiers").bold(),
        format_threshold_percent(settings.threshold)
    );
    println!();

    let lines = tier_lines(&settings.tiers, settings.threshold);
    let name_width = lines.iter().map(|l| l.name.len()).max().unwrap_or(0);

    for line in &lines {
        println!(
            "   {:<width$}  {:>10}   up to {} bytes",
            style(&line.name).cyan(),
            format_bytes(line.capacity_bytes),
            format_thousands(line.max_usage_bytes),
            width = name_width
        );
    }

    Ok(())
}
