//! Report command implementation
//!
//! Handles the `asp-tier-sizer report` command which lists every stream
//! processor, fetches its memory usage and prints a tier recommendation per
//! processor.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{ConfigLoader, Overrides, Settings, SettingsResolver};
use crate::error::TierSizerError;
use crate::infra::RealCommandExecutor;
use crate::report::{collect_usage_samples, list_processor_names, JsonReport, TierReport};
use crate::source::{MongoshSource, ProcessorSource, SnapshotSource};
use crate::tools::Tool;

/// Options for the report command
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Connection string override
    pub uri: Option<String>,
    /// Read processors from a snapshot file instead of mongosh
    pub from_file: Option<PathBuf>,
    /// Threshold override
    pub threshold: Option<f64>,
    /// Print JSON instead of the text report
    pub json: bool,
    /// Fail when any processor exceeds the largest tier
    pub check: bool,
}

/// Print tier recommendations for all stream processors
///
/// # Examples
///
/// ```no_run
/// use asp_tier_sizer::cmd::report::{cmd_report, ReportOptions};
///
/// // Size processors from a captured snapshot
/// cmd_report(&ReportOptions {
///     from_file: Some("snapshot.json".into()),
///     ..Default::default()
/// })?;
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - The configuration file is invalid
/// - The snapshot file does not exist
/// - mongosh is not installed (live mode)
/// - `check` is set and a processor exceeds the largest tier
pub fn cmd_report(options: &ReportOptions) -> Result<()> {
    let project_root = env::current_dir()?;
    let config = ConfigLoader::load(&project_root)?;
    let settings = SettingsResolver::resolve(
        &config,
        &Overrides {
            threshold: options.threshold,
            uri: options.uri.clone(),
        },
    )?;

    let show_progress = !options.json;
    let report = match &options.from_file {
        Some(path) => {
            if !path.exists() {
                return Err(TierSizerError::SnapshotNotFound { path: path.clone() }.into());
            }
            run_report(&SnapshotSource::new(path), &settings, show_progress)
        }
        None => {
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
            run_report(&source, &settings, show_progress)
        }
    };

    debug!(
        "{} processor(s), {} without usable stats",
        report.rows.len(),
        report.unavailable_count()
    );

    if options.json {
        let json = JsonReport::from_report(&report)
            .to_json_pretty()
            .context("Failed to serialize report")?;
        println!("{}", json);
    } else {
        print!("{}", report.render_text());
    }

    if options.check {
        check_report(&report)?;
    }

    Ok(())
}

/// Collect usage for every listed processor and size it
///
/// Rows keep listing order. Stats are fetched in one batch.
pub fn run_report<S: ProcessorSource>(source: &S, settings: &Settings, show_progress: bool) -> TierReport {
    let names = list_processor_names(source);
    let progress = (show_progress && !names.is_empty()).then(|| create_progress(names.len()));

    let samples = collect_usage_samples(source, &names);

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    TierReport::build(samples, &settings.tiers, settings.threshold)
}

/// Fail when any processor has no suitable tier
pub fn check_report(report: &TierReport) -> Result<(), TierSizerError> {
    let oversized = report.oversized();
    if oversized.is_empty() {
        return Ok(());
    }

    Err(TierSizerError::NoSuitableTier {
        processors: oversized.into_iter().map(str::to_string).collect(),
        largest_tier: report.largest_tier.clone(),
    })
}

fn create_progress(processors: usize) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(format!("fetching stats for {} processor(s)", processors));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
