use asp_tier_sizer::cmd;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use std::process;

/// Stream processor tier recommender
///
/// asp-tier-sizer reads the memory usage of every stream processor on an
/// Atlas Stream Processing instance and recommends the smallest tier that
/// keeps usage at or below a target share of tier memory.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable emoji output (useful for CI/CD or accessibility)
    #[arg(long, global = true)]
    no_emoji: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend a tier for every stream processor
    Report {
        /// Connection string of the stream processing instance
        #[arg(long)]
        uri: Option<String>,

        /// Read processors from a snapshot file instead of mongosh
        #[arg(long, value_name = "FILE", conflicts_with = "uri")]
        from_file: Option<PathBuf>,

        /// Target share of tier memory, in (0, 1]
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Output as JSON (for CI/CD integration)
        #[arg(long)]
        json: bool,

        /// Fail if any processor exceeds the largest tier
        #[arg(long)]
        check: bool,
    },

    /// Recommend a tier for a single memory figure
    Recommend {
        /// Memory usage in bytes (separators and K/M/G suffixes accepted)
        #[arg(value_name = "BYTES", value_parser = cmd::parse_byte_count)]
        bytes: u64,

        /// Target share of tier memory, in (0, 1]
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the tier table and per-tier usage ceilings
    Tiers {
        /// Target share of tier memory, in (0, 1]
        #[arg(short, long)]
        threshold: Option<f64>,
    },

    /// Capture processor stats into a snapshot file
    Snapshot {
        /// Connection string of the stream processing instance
        #[arg(long)]
        uri: Option<String>,

        /// Snapshot file to write
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Initialize asp-tier-sizer configuration
    Init {
        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    // Initialize logger (use RUST_LOG env var to control verbosity)
    env_logger::init();

    let cli = Cli::parse();

    // Set console emoji mode based on CLI flag
    if cli.no_emoji {
        std::env::set_var(asp_tier_sizer::fmt::NO_EMOJI_ENV, "1");
    }

    let result = match cli.command {
        Some(Commands::Report {
            uri,
            from_file,
            threshold,
            json,
            check,
        }) => cmd::cmd_report(&cmd::ReportOptions {
            uri,
            from_file,
            threshold,
            json,
            check,
        }),
        Some(Commands::Recommend {
            bytes,
            threshold,
            json,
        }) => cmd::cmd_recommend(bytes, threshold, json),
        Some(Commands::Tiers { threshold }) => cmd::cmd_tiers(threshold),
        Some(Commands::Snapshot { uri, output }) => cmd::cmd_snapshot(uri, &output),
        Some(Commands::Init { force }) => cmd::cmd_init(force),
        Some(Commands::Completions { shell }) => {
            cmd::cmd_completions(shell, &mut Cli::command(), &mut std::io::stdout());
            Ok(())
        }
        None => Cli::command().print_help().map_err(anyhow::Error::from),
    };

    if let Err(e) = result {
        use asp_tier_sizer::error::ErrorFormatter;
        eprintln!("{}", ErrorFormatter::format(&e));
        let exit_code = ErrorFormatter::exit_code(&e);
        process::exit(exit_code);
    }
}
