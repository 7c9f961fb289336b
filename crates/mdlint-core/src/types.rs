//! Core types for lint violations and results.

use crate::document::ParseWarning;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Whether a violation reports a finding or a rule fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// The rule's condition was met.
    Rule,
    /// The rule faulted while evaluating the document.
    InternalError,
}

/// A lint violation found during evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Rule code (e.g., "MD007").
    pub code: String,
    /// Rule alias (e.g., "ul-indent").
    pub rule: String,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed), when the rule can pinpoint one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    /// Human-readable message.
    pub message: String,
    /// Finding or internal error.
    pub kind: ViolationKind,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        line: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            line,
            column: None,
            message: message.into(),
            kind: ViolationKind::Rule,
        }
    }

    /// Creates the violation reported when a rule faults.
    #[must_use]
    pub fn internal_error(
        code: impl Into<String>,
        rule: impl Into<String>,
        detail: impl std::fmt::Display,
    ) -> Self {
        Self {
            kind: ViolationKind::InternalError,
            ..Self::new(code, rule, 1, format!("internal error in rule: {detail}"))
        }
    }

    /// Sets the column.
    #[must_use]
    pub fn with_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }

    /// Returns true for rule faults.
    #[must_use]
    pub fn is_internal_error(&self) -> bool {
        self.kind == ViolationKind::InternalError
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.line)?;
        if let Some(column) = self.column {
            write!(f, ":{column}")?;
        }
        write!(f, ": {} {}", self.code, self.message)
    }
}

/// Sorts violations by line, then rule code, then column and message.
///
/// The order is total, so the result does not depend on which rule ran first.
pub fn sort_violations(violations: &mut [Violation]) {
    violations.sort_by(|a, b| {
        a.line
            .cmp(&b.line)
            .then_with(|| a.code.cmp(&b.code))
            .then_with(|| a.column.cmp(&b.column))
            .then_with(|| a.message.cmp(&b.message))
            .then_with(|| (a.kind as u8).cmp(&(b.kind as u8)))
    });
}

/// Ordered violations from evaluating one document.
///
/// Iterating is finite; evaluating again yields the same sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    /// Sorted violations.
    pub violations: Vec<Violation>,
    /// Number of rules that ran.
    pub rules_run: usize,
    /// Number of enabled rules not started because the deadline passed.
    pub rules_skipped: usize,
}

impl Evaluation {
    /// Iterates over the violations in report order.
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }

    /// Number of violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true when nothing was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

impl IntoIterator for Evaluation {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl<'a> IntoIterator for &'a Evaluation {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

/// Result of linting one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    /// File path as given.
    pub path: PathBuf,
    /// Sorted violations.
    pub violations: Vec<Violation>,
    /// Parse warnings for the file.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ParseWarning>,
    /// Enabled rules not started because the deadline passed.
    #[serde(skip_serializing_if = "is_zero")]
    pub rules_skipped: usize,
}

#[allow(clippy::trivially_copy_pass_by_ref)] // serde skip_serializing_if signature
fn is_zero(n: &usize) -> bool {
    *n == 0
}

/// A file that could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileError {
    /// File path as given.
    pub path: PathBuf,
    /// Error description.
    pub message: String,
}

/// Result of linting a batch of files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LintResult {
    /// Per-file reports, sorted by path.
    pub files: Vec<FileReport>,
    /// Files that could not be read.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FileError>,
    /// Files not started because the deadline passed.
    #[serde(skip_serializing_if = "is_zero")]
    pub files_skipped: usize,
    /// Whether the run deadline cut any work.
    pub deadline_exceeded: bool,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of files that were evaluated.
    #[must_use]
    pub fn files_checked(&self) -> usize {
        self.files.len()
    }

    /// Total number of violations.
    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.files.iter().map(|f| f.violations.len()).sum()
    }

    /// Returns true if any file reported a violation.
    #[must_use]
    pub fn has_violations(&self) -> bool {
        self.files.iter().any(|f| !f.violations.is_empty())
    }

    /// Iterates over `(path, violation)` in file then report order.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, &Violation)> {
        self.files
            .iter()
            .flat_map(|f| f.violations.iter().map(move |v| (f.path.as_path(), v)))
    }

    /// Iterates over `(path, warning)` for all parse warnings.
    pub fn warnings(&self) -> impl Iterator<Item = (&Path, &ParseWarning)> {
        self.files
            .iter()
            .flat_map(|f| f.warnings.iter().map(move |w| (f.path.as_path(), w)))
    }
}
