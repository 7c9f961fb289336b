//! Settings and style file resolution with global fallback.
//!
//! Settings are resolved in a deterministic priority order:
//!
//! 1. `--settings` flag (explicit path)
//! 2. `{project}/mdlint.toml` or `.mdlint.toml`
//! 3. `~/.mdlint/config.toml` (global fallback)
//! 4. No settings found → defaults
//!
//! The style file follows `--config`, then the `style` key of the
//! settings, then `{project}/.mdlstyle.rb` or `.mdl_style.rb`. Without
//! any of these every rule runs at its defaults.

use anyhow::{Context, Result};
use mdlint_core::{Policy, Registry, Resolver, Settings};
use std::path::{Path, PathBuf};

/// Paths given on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct Explicit<'a> {
    /// `--config`
    pub style: Option<&'a Path>,
    /// `--settings`
    pub settings: Option<&'a Path>,
}

/// Where a configuration file was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified on the command line.
    Explicit(PathBuf),
    /// Named by the `style` key of the settings file.
    Settings(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Loaded from the global config directory (`~/.mdlint/`).
    Global(PathBuf),
    /// Nothing found; defaults will be used.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Settings(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` if the file was loaded from the global directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

/// Project-level settings file names, checked in order.
const PROJECT_SETTINGS_NAMES: &[&str] = &["mdlint.toml", ".mdlint.toml"];

/// Project-level style file names, checked in order.
const PROJECT_STYLE_NAMES: &[&str] = &[".mdlstyle.rb", ".mdl_style.rb"];

/// Settings file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Directive text used when no style file is found.
pub const BUILTIN_STYLE: &str = "all\n";

/// Resolves the settings file path.
#[must_use]
pub fn resolve_settings(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_settings_inner(project_dir, explicit, global_config_dir())
}

/// Settings lookup with the global directory passed in rather than read
/// from the environment.
fn resolve_settings_inner(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = first_existing(project_dir, PROJECT_SETTINGS_NAMES) {
        tracing::debug!("Found project settings: {}", found.display());
        return ConfigSource::Project(found);
    }

    if let Some(dir) = global_dir {
        let candidate = dir.join(GLOBAL_CONFIG_NAME);
        if candidate.exists() {
            tracing::debug!("Found global settings: {}", candidate.display());
            return ConfigSource::Global(candidate);
        }
    }

    ConfigSource::Default
}

/// Resolves the style file path.
///
/// A relative `style` from a settings file is taken relative to the
/// directory holding that settings file.
#[must_use]
pub fn resolve_style(
    project_dir: &Path,
    explicit: Option<&Path>,
    settings_style: Option<(&Path, Option<&Path>)>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some((style, settings_file)) = settings_style {
        let base = settings_file.and_then(Path::parent).unwrap_or(project_dir);
        return ConfigSource::Settings(base.join(style));
    }

    match first_existing(project_dir, PROJECT_STYLE_NAMES) {
        Some(found) => {
            tracing::debug!("Found project style file: {}", found.display());
            ConfigSource::Project(found)
        }
        None => ConfigSource::Default,
    }
}

fn first_existing(dir: &Path, names: &[&str]) -> Option<PathBuf> {
    names
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.exists())
}

/// Returns the global config directory path.
///
/// Resolution: `$MDLINT_CONFIG_DIR` > `~/.mdlint/`
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("MDLINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".mdlint"))
}

/// Settings together with the file they came from.
#[derive(Debug)]
pub struct Loaded {
    /// Parsed settings.
    pub settings: Settings,
    /// Where they were found.
    pub source: ConfigSource,
}

/// Loads the settings for `project_dir`.
///
/// # Errors
///
/// Returns an error when a found settings file cannot be read or parsed.
pub fn load_settings(project_dir: &Path, explicit: Option<&Path>) -> Result<Loaded> {
    let source = resolve_settings(project_dir, explicit);
    let settings = match source.path() {
        None => Settings::default(),
        Some(p) => {
            if source.is_global() {
                tracing::info!("Using global settings: {}", p.display());
            }
            Settings::from_file(p)
                .with_context(|| format!("Failed to load settings: {}", p.display()))?
        }
    };
    Ok(Loaded { settings, source })
}

/// Resolves the policy for a run.
///
/// # Errors
///
/// Returns [`mdlint_core::ConfigError`] unchanged so the caller can render
/// it as a diagnostic.
pub fn load_policy(
    registry: &Registry,
    project_dir: &Path,
    explicit: Option<&Path>,
    loaded: &Loaded,
) -> Result<Policy> {
    let settings_style = loaded
        .settings
        .style
        .as_deref()
        .map(|style| (style, loaded.source.path()));
    let source = resolve_style(project_dir, explicit, settings_style);
    let resolver = Resolver::new(registry).lenient(loaded.settings.lenient);

    let policy = match source.path() {
        Some(p) => {
            tracing::info!("Using style file: {}", p.display());
            resolver.resolve_file(p)?
        }
        None => {
            tracing::debug!("No style file found, enabling every rule");
            resolver.resolve_str(BUILTIN_STYLE)?
        }
    };
    Ok(policy)
}
