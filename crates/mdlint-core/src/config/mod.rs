//! Style files, policy resolution, and run settings.
//!
//! A style file is a list of directives (see [`directive`]). The
//! [`Resolver`] folds them against a [`Registry`](crate::Registry) into an
//! immutable [`Policy`]. [`Settings`] carries the TOML-configured knobs
//! for a run.

pub mod directive;
mod policy;
mod resolver;
mod settings;

pub use directive::{parse_directives, Directive, DirectiveLine};
pub use policy::{Policy, RuleState};
pub use resolver::Resolver;
pub use settings::{Settings, SettingsError};

use miette::Diagnostic;
use std::path::PathBuf;

/// Errors raised while reading or resolving a style file.
///
/// All of these are fatal: nothing is evaluated under a policy that
/// failed to resolve.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum ConfigError {
    /// The style file could not be read.
    #[error("Failed to read style file {path}: {source}")]
    #[diagnostic(code(mdlint::config::io))]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// A line does not match the directive grammar.
    #[error("line {line}: {message}")]
    #[diagnostic(
        code(mdlint::config::syntax),
        help("directives look like `all`, `rule 'MD007', :indent => 4` or `exclude_rule 'MD001'`")
    )]
    Syntax {
        /// 1-based line in the style file.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// A rule id or alias is not in the registry.
    #[error("line {line}: unknown rule '{id}'")]
    #[diagnostic(
        code(mdlint::config::unknown_rule),
        help("run `mdlint list-rules` to see the available rules, or pass --lenient to skip unknown ids")
    )]
    UnknownRule {
        /// 1-based line in the style file.
        line: usize,
        /// The reference as written.
        id: String,
    },

    /// No registered rule carries the tag.
    #[error("line {line}: unknown tag '{tag}'")]
    #[diagnostic(
        code(mdlint::config::unknown_tag),
        help("run `mdlint list-rules` to see rule tags, or pass --lenient to skip unknown tags")
    )]
    UnknownTag {
        /// 1-based line in the style file.
        line: usize,
        /// The tag as written.
        tag: String,
    },

    /// The rule does not declare the option.
    #[error("line {line}: rule {rule} has no option '{option}'")]
    #[diagnostic(code(mdlint::config::unknown_parameter))]
    UnknownParameter {
        /// 1-based line in the style file.
        line: usize,
        /// Rule code.
        rule: String,
        /// The option as written.
        option: String,
        /// Options the rule does declare.
        #[help]
        known: Option<String>,
    },

    /// The option value does not fit the declared type.
    #[error("line {line}: option '{option}' of rule {rule} expects {expected}, found {found}")]
    #[diagnostic(code(mdlint::config::type_mismatch))]
    TypeMismatch {
        /// 1-based line in the style file.
        line: usize,
        /// Rule code.
        rule: String,
        /// Option name.
        option: String,
        /// Expected type description.
        expected: String,
        /// What was written.
        found: String,
    },
}

impl ConfigError {
    /// The style file line the error points at, if any.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Io { .. } => None,
            Self::Syntax { line, .. }
            | Self::UnknownRule { line, .. }
            | Self::UnknownTag { line, .. }
            | Self::UnknownParameter { line, .. }
            | Self::TypeMismatch { line, .. } => Some(*line),
        }
    }
}
