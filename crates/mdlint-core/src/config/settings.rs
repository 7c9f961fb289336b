//! Run settings loaded from `mdlint.toml`.

use crate::document::{ParseOptions, DEFAULT_TAB_WIDTH};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level settings for a lint run.
///
/// ```toml
/// style = ".mdlstyle.rb"
/// lenient = false
/// tab_width = 4
/// deadline_ms = 5000
/// exclude = ["**/node_modules/**", "CHANGELOG.md"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Style file to resolve the policy from.
    #[serde(default)]
    pub style: Option<PathBuf>,

    /// Skip unknown rule ids and tags instead of failing.
    #[serde(default)]
    pub lenient: bool,

    /// Column width a tab expands to.
    #[serde(default = "default_tab_width")]
    pub tab_width: usize,

    /// Treat a leading `---` block as YAML front matter.
    #[serde(default = "default_true")]
    pub ignore_front_matter: bool,

    /// Stop scheduling new work after this many milliseconds.
    #[serde(default)]
    pub deadline_ms: Option<u64>,

    /// Evaluate rules and files on the rayon pool.
    #[serde(default = "default_true")]
    pub parallel: bool,

    /// Glob patterns of paths to skip.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// File extensions treated as Markdown.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            style: None,
            lenient: false,
            tab_width: default_tab_width(),
            ignore_front_matter: true,
            deadline_ms: None,
            parallel: true,
            exclude: default_exclude(),
            extensions: default_extensions(),
        }
    }
}

fn default_tab_width() -> usize {
    DEFAULT_TAB_WIDTH
}

fn default_true() -> bool {
    true
}

fn default_exclude() -> Vec<String> {
    vec!["**/node_modules/**".to_string(), "**/target/**".to_string()]
}

fn default_extensions() -> Vec<String> {
    vec!["md".to_string(), "markdown".to_string()]
}

impl Settings {
    /// Loads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|e| SettingsError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses settings from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or a value is out of range.
    pub fn parse(content: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(content).map_err(|e| SettingsError::Parse {
            message: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.tab_width == 0 {
            return Err(SettingsError::Invalid {
                message: "tab_width must be at least 1".to_string(),
            });
        }
        if let Some(bad) = self
            .exclude
            .iter()
            .find(|p| glob::Pattern::new(p).is_err())
        {
            return Err(SettingsError::Invalid {
                message: format!("invalid exclude pattern '{bad}'"),
            });
        }
        Ok(())
    }

    /// Document parsing options derived from these settings.
    #[must_use]
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            tab_width: self.tab_width,
            ignore_front_matter: self.ignore_front_matter,
        }
    }

    /// The run deadline, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_ms.map(Duration::from_millis)
    }

    /// Checks whether `path` matches an exclude pattern.
    #[must_use]
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        let path_str = path_str.strip_prefix("./").unwrap_or(&path_str);
        self.exclude
            .iter()
            .filter_map(|p| glob::Pattern::new(p).ok())
            .any(|p| p.matches(path_str) || p.matches_path(path))
    }

    /// Checks whether `path` has a Markdown extension.
    #[must_use]
    pub fn is_markdown(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|x| x.eq_ignore_ascii_case(ext)))
    }
}

/// Settings errors.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// IO error reading the settings file.
    #[error("Failed to read settings file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// TOML parse error.
    #[error("Failed to parse settings: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A value is out of range.
    #[error("Invalid settings: {message}")]
    Invalid {
        /// What is wrong.
        message: String,
    },
}
