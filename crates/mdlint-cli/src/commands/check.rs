//! Check command implementation.

use anyhow::{Context, Result};
use mdlint_core::{Engine, Policy, Registry, Settings};
use mdlint_rules::registry;
use std::path::{Path, PathBuf};

use crate::config_resolver::{self, Explicit};
use crate::{OutputFormat, Outcome};

/// Arguments of `mdlint check`.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Files or directories to lint (default: current directory)
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Only run specific rules (comma-separated ids or aliases)
    #[arg(long)]
    pub rules: Option<String>,

    /// Skip unknown rule ids and tags in the style file
    #[arg(long)]
    pub lenient: bool,

    /// Column width a tab expands to
    #[arg(long)]
    pub tab_width: Option<usize>,

    /// Stop starting new work after this many milliseconds
    #[arg(long)]
    pub deadline_ms: Option<u64>,

    /// Evaluate on the current thread only
    #[arg(long)]
    pub sequential: bool,

    /// Exclude patterns (can be specified multiple times)
    #[arg(short, long)]
    pub exclude: Vec<String>,
}

impl CheckArgs {
    /// Applies command-line overrides on top of loaded settings.
    fn apply(&self, mut settings: Settings) -> Settings {
        settings.lenient |= self.lenient;
        if let Some(width) = self.tab_width {
            settings.tab_width = width.max(1);
        }
        if self.deadline_ms.is_some() {
            settings.deadline_ms = self.deadline_ms;
        }
        if self.sequential {
            settings.parallel = false;
        }
        settings.exclude.extend(self.exclude.iter().cloned());
        settings
    }
}

/// Runs the check command.
pub fn run(args: &CheckArgs, explicit: &Explicit<'_>) -> Result<Outcome> {
    let project = Path::new(".");
    let mut loaded = config_resolver::load_settings(project, explicit.settings)?;
    loaded.settings = args.apply(loaded.settings);

    let registry = registry();
    let mut policy = config_resolver::load_policy(registry, project, explicit.style, &loaded)?;
    if let Some(filter) = &args.rules {
        policy = restrict(registry, policy, filter);
    }

    let settings = &loaded.settings;
    let files = crate::files::discover(&args.paths, settings)?;

    let engine = Engine::builder(registry)
        .policy(policy)
        .parse_options(settings.parse_options())
        .parallel(settings.parallel)
        .deadline(settings.deadline())
        .build()
        .context("Failed to build engine")?;

    let result = engine.lint_files(&files);

    super::output::print(&result, args.format)?;

    if result.has_violations() || !result.errors.is_empty() {
        Ok(Outcome::Findings)
    } else {
        Ok(Outcome::Clean)
    }
}

/// Keeps only the rules named in a comma-separated list of ids or aliases.
fn restrict(registry: &Registry, policy: Policy, filter: &str) -> Policy {
    let codes: Vec<&str> = filter
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .filter_map(|name| {
            let found = registry.lookup(name).map(|rule| rule.code());
            if found.is_none() {
                tracing::warn!("Unknown rule: {}", name);
            }
            found
        })
        .collect();
    policy.restrict_to(&codes)
}
