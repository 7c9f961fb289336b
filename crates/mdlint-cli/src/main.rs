//! mdlint CLI tool.
//!
//! Usage:
//! ```bash
//! mdlint check [OPTIONS] [PATHS]...
//! mdlint list-rules
//! mdlint policy
//! mdlint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;
mod files;

/// Rule-based Markdown linter driven by mdl style files
#[derive(Parser)]
#[command(name = "mdlint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the style file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the settings file
    #[arg(short, long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint Markdown files
    Check(commands::check::CheckArgs),

    /// List available rules
    ListRules {
        /// Only show rules carrying this tag
        #[arg(long)]
        tag: Option<String>,

        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the resolved policy as a style file
    Policy {
        /// Skip unknown rule ids and tags
        #[arg(long)]
        lenient: bool,

        /// Print the policy as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a starter style file
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,

        /// Also write mdlint.toml with the default settings
        #[arg(long)]
        with_settings: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
}

/// Process exit status of a finished command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to report.
    Clean,
    /// Violations (or unreadable files) were reported.
    Findings,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Clean => Self::SUCCESS,
            Outcome::Findings => Self::from(1),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(outcome) => outcome.into(),
        Err(err) => {
            report_error(err);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<Outcome> {
    let explicit = config_resolver::Explicit {
        style: cli.config.as_deref(),
        settings: cli.settings.as_deref(),
    };

    match cli.command {
        Commands::Check(args) => commands::check::run(&args, &explicit),
        Commands::ListRules { tag, json } => {
            commands::list_rules::run(tag.as_deref(), json)?;
            Ok(Outcome::Clean)
        }
        Commands::Policy { lenient, json } => {
            commands::policy::run(&explicit, lenient, json)?;
            Ok(Outcome::Clean)
        }
        Commands::Init {
            force,
            with_settings,
        } => {
            commands::init::run(std::path::Path::new("."), force, with_settings)?;
            Ok(Outcome::Clean)
        }
    }
}

/// Style file problems render as diagnostics; everything else as a chain.
fn report_error(err: anyhow::Error) {
    match err.downcast::<mdlint_core::ConfigError>() {
        Ok(config) => eprintln!("{:?}", miette::Report::new(config)),
        Err(other) => eprintln!("Error: {other:#}"),
    }
}
