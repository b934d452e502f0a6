//! Init command implementation
//!
//! Handles the `asp-tier-sizer init` command which writes a starter
//! `.asp-tier-sizer.toml` holding the default threshold and tier table.

use anyhow::Result;
use console::style;
use std::env;
use std::path::Path;

use crate::config::{self, ConfigFile, ConfigLoader};
use crate::error::TierSizerError;
use crate::fmt::{format_bytes, format_threshold_percent, CHECKMARK, INFO, SPARKLES};

/// Create a starter configuration in the current directory
///
/// # Examples
///
/// ```no_run
/// use asp_tier_sizer::cmd::init::cmd_init;
///
/// // Refuses to overwrite an existing file
/// cmd_init(false)?;
///
/// // Replace whatever is there
/// cmd_init(true)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_init(force: bool) -> Result<()> {
    let project_root = env::current_dir()?;
    init_in(&project_root, force)
}

/// Create a starter configuration in `project_root`
pub fn init_in(project_root: &Path, force: bool) -> Result<()> {
    if ConfigLoader::exists(project_root) && !force {
        return Err(TierSizerError::ConfigExists {
            path: project_root.join(config::CONFIG_FILE_NAME),
        }
        .into());
    }

    let starter = ConfigFile::starter();
    ConfigLoader::save(&starter, project_root)?;

    println!(
        "{} Created {}",
        CHECKMARK,
        style(config::CONFIG_FILE_NAME).cyan()
    );
    println!();
    println!(
        "{}  Threshold: {}%",
        INFO,
        style(format_threshold_percent(starter.threshold)).green()
    );
    for tier in starter.tiers.iter().flatten() {
        println!(
            "   {} {} = {}",
            style("•").dim(),
            tier.name,
            style(format_bytes(tier.capacity_bytes)).green()
        );
    }
    println!();
    println!(
        "{} Next: run {} to size your processors",
        SPARKLES,
        style("asp-tier-sizer report").bold()
    );

    Ok(())
}
