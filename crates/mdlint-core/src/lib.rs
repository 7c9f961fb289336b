//! # mdlint-core
//!
//! Core framework for rule-based Markdown linting.
//!
//! This crate provides the foundational types for building Markdown
//! linters. It includes:
//!
//! - [`Document`], a block, line and inline-span view of a Markdown file
//! - [`Rule`] trait for independent, side-effect free rules
//! - [`Registry`], an ordered catalog of rules with alias and tag lookup
//! - [`Resolver`] for turning `mdl`-style directives into a [`Policy`]
//! - [`Engine`] for running the enabled rules over documents and files
//!
//! ## Example
//!
//! ```ignore
//! use mdlint_core::{Engine, Resolver};
//!
//! let registry = mdlint_rules::registry();
//! let policy = Resolver::new(registry).resolve_str("all\nexclude_rule 'MD013'\n")?;
//!
//! let engine = Engine::builder(registry).policy(policy).build()?;
//! let result = engine.lint_files(&["README.md".into()]);
//! for (path, violation) in result.iter() {
//!     println!("{}:{}", path.display(), violation);
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod document;
mod engine;
mod params;
mod registry;
mod rule;
mod types;

pub use config::{ConfigError, Policy, Resolver, RuleState, Settings, SettingsError};
pub use document::{Block, BlockKind, Document, HeadingStyle, Line, ParseOptions, ParseWarning};
pub use engine::{Engine, EngineBuilder, EngineError};
pub use params::{Literal, ParamKind, ParamSpec, ParamValue, RuleParams};
pub use registry::Registry;
pub use rule::{Rule, RuleBox};
pub use types::{
    sort_violations, Evaluation, FileError, FileReport, LintResult, Violation, ViolationKind,
};
