//! Evaluation engine: runs the enabled rules over documents.

use crate::config::{Policy, RuleState};
use crate::document::{Document, ParseOptions};
use crate::params::RuleParams;
use crate::registry::Registry;
use crate::rule::Rule;
use crate::types::{sort_violations, Evaluation, FileError, FileReport, LintResult, Violation};

use rayon::prelude::*;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while building an [`Engine`].
#[derive(Debug, Error)]
pub enum EngineError {
    /// The policy names a rule the registry does not have.
    #[error("Policy refers to unregistered rule {0}")]
    UnregisteredRule(String),

    /// A registered rule has no entry in the policy.
    #[error("Policy does not cover rule {0}")]
    UncoveredRule(String),

    /// The dedicated thread pool could not be created.
    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Builder for configuring an [`Engine`].
pub struct EngineBuilder<'r> {
    registry: &'r Registry,
    policy: Option<Policy>,
    parse_options: ParseOptions,
    parallel: bool,
    deadline: Option<Duration>,
    threads: Option<usize>,
}

impl<'r> EngineBuilder<'r> {
    /// Creates a builder over `registry`.
    #[must_use]
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            policy: None,
            parse_options: ParseOptions::default(),
            parallel: true,
            deadline: None,
            threads: None,
        }
    }

    /// Sets the policy (default: every rule enabled at defaults).
    #[must_use]
    pub fn policy(mut self, policy: Policy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Sets the options used to parse files.
    #[must_use]
    pub fn parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Sets whether rules and files run in parallel (default: true).
    #[must_use]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Stops scheduling new work once this much time has passed.
    #[must_use]
    pub fn deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Runs on a dedicated pool with `n` threads instead of the global one.
    #[must_use]
    pub fn threads(mut self, n: usize) -> Self {
        self.threads = Some(n);
        self
    }

    /// Builds the engine.
    ///
    /// # Errors
    ///
    /// Returns an error if the policy and registry disagree or the thread
    /// pool cannot be created.
    pub fn build(self) -> Result<Engine<'r>, EngineError> {
        let policy = match self.policy {
            Some(policy) => {
                for (code, _) in policy.iter() {
                    if self.registry.get(code).is_none() {
                        return Err(EngineError::UnregisteredRule(code.to_string()));
                    }
                }
                if let Some(rule) = self.registry.iter().find(|r| policy.state(r.code()).is_none()) {
                    return Err(EngineError::UncoveredRule(rule.code().to_string()));
                }
                policy
            }
            None => Policy::all_enabled(self.registry),
        };

        let pool = match self.threads {
            Some(n) => Some(rayon::ThreadPoolBuilder::new().num_threads(n).build()?),
            None => None,
        };

        Ok(Engine {
            registry: self.registry,
            policy,
            parse_options: self.parse_options,
            parallel: self.parallel,
            deadline: self.deadline,
            pool,
        })
    }
}

/// Runs the rules a [`Policy`] enables.
///
/// Use [`Engine::builder()`] to construct an instance.
pub struct Engine<'r> {
    registry: &'r Registry,
    policy: Policy,
    parse_options: ParseOptions,
    parallel: bool,
    deadline: Option<Duration>,
    pool: Option<rayon::ThreadPool>,
}

impl<'r> Engine<'r> {
    /// Creates a new builder over `registry`.
    #[must_use]
    pub fn builder(registry: &'r Registry) -> EngineBuilder<'r> {
        EngineBuilder::new(registry)
    }

    /// The policy in effect.
    #[must_use]
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Options used to parse files.
    #[must_use]
    pub fn parse_options(&self) -> &ParseOptions {
        &self.parse_options
    }

    /// Number of enabled rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.policy.enabled().count()
    }

    /// Evaluates every enabled rule against `doc`.
    ///
    /// A rule that panics is reported as a single internal-error violation
    /// and the remaining rules still run.
    #[must_use]
    pub fn evaluate(&self, doc: &Document) -> Evaluation {
        let until = self.deadline.map(|d| Instant::now() + d);
        self.evaluate_until(doc, until)
    }

    /// Parses `text` and evaluates it as the file at `path`.
    #[must_use]
    pub fn lint_str(&self, path: impl Into<PathBuf>, text: &str) -> FileReport {
        let until = self.deadline.map(|d| Instant::now() + d);
        self.lint_source(path.into(), text, until)
    }

    /// Reads and lints every file in `paths`.
    ///
    /// All files are read before any is evaluated; unreadable files become
    /// [`FileError`]s and the rest are still linted.
    #[must_use]
    pub fn lint_files(&self, paths: &[PathBuf]) -> LintResult {
        let until = self.deadline.map(|d| Instant::now() + d);
        info!(
            "Linting {} files with {} rules",
            paths.len(),
            self.rule_count()
        );

        let mut result = LintResult::new();
        let mut sources = Vec::with_capacity(paths.len());
        for path in paths {
            match std::fs::read_to_string(path) {
                Ok(text) => sources.push((path, text)),
                Err(e) => {
                    warn!("Failed to read {}: {}", path.display(), e);
                    result.errors.push(FileError {
                        path: path.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        let lint_one = |path: &Path, text: &str| -> Option<FileReport> {
            if expired(until) {
                debug!("Deadline passed; not starting {}", path.display());
                return None;
            }
            Some(self.lint_source(path.to_path_buf(), text, until))
        };

        let reports: Vec<Option<FileReport>> = if self.parallel {
            self.install(|| {
                sources
                    .par_iter()
                    .map(|(path, text)| lint_one(path, text))
                    .collect()
            })
        } else {
            sources
                .iter()
                .map(|(path, text)| lint_one(path, text))
                .collect()
        };

        for report in reports {
            match report {
                Some(report) => result.files.push(report),
                None => result.files_skipped += 1,
            }
        }
        result.files.sort_by(|a, b| a.path.cmp(&b.path));
        result.errors.sort_by(|a, b| a.path.cmp(&b.path));
        result.deadline_exceeded =
            result.files_skipped > 0 || result.files.iter().any(|f| f.rules_skipped > 0);

        info!(
            "Lint complete: {} violations in {} files",
            result.violation_count(),
            result.files_checked()
        );
        if result.deadline_exceeded {
            warn!(
                "Deadline exceeded: {} files not started",
                result.files_skipped
            );
        }

        result
    }

    fn lint_source(&self, path: PathBuf, text: &str, until: Option<Instant>) -> FileReport {
        debug!("Linting: {}", path.display());
        let doc = Document::parse_with(text, &self.parse_options);
        let evaluation = self.evaluate_until(&doc, until);
        FileReport {
            path,
            violations: evaluation.violations,
            warnings: doc.warnings().to_vec(),
            rules_skipped: evaluation.rules_skipped,
        }
    }

    fn evaluate_until(&self, doc: &Document, until: Option<Instant>) -> Evaluation {
        let jobs: Vec<(&dyn Rule, &RuleParams)> = self
            .policy
            .iter()
            .filter_map(|(code, state)| match state {
                RuleState::Enabled(params) => self.registry.get(code).map(|r| (r, params)),
                RuleState::Disabled => None,
            })
            .collect();

        let outcomes: Vec<Option<Vec<Violation>>> = if self.parallel {
            self.install(|| {
                jobs.par_iter()
                    .map(|&(rule, params)| run_scheduled(rule, doc, params, until))
                    .collect()
            })
        } else {
            jobs.iter()
                .map(|&(rule, params)| run_scheduled(rule, doc, params, until))
                .collect()
        };

        let mut evaluation = Evaluation::default();
        for outcome in outcomes {
            match outcome {
                Some(found) => {
                    evaluation.rules_run += 1;
                    evaluation.violations.extend(found);
                }
                None => evaluation.rules_skipped += 1,
            }
        }
        sort_violations(&mut evaluation.violations);
        evaluation
    }

    fn install<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

fn expired(until: Option<Instant>) -> bool {
    until.is_some_and(|t| Instant::now() >= t)
}

fn run_scheduled(
    rule: &dyn Rule,
    doc: &Document,
    params: &RuleParams,
    until: Option<Instant>,
) -> Option<Vec<Violation>> {
    if expired(until) {
        debug!("Deadline passed; not starting {}", rule.code());
        return None;
    }
    Some(run_rule(rule, doc, params))
}

/// Runs one rule, turning a panic into an internal-error violation.
fn run_rule(rule: &dyn Rule, doc: &Document, params: &RuleParams) -> Vec<Violation> {
    match panic::catch_unwind(AssertUnwindSafe(|| rule.check(doc, params))) {
        Ok(violations) => {
            debug!("{}: {} violations", rule.code(), violations.len());
            violations
        }
        Err(payload) => {
            let detail = panic_message(payload.as_ref());
            warn!("Rule {} faulted: {}", rule.code(), detail);
            vec![Violation::internal_error(rule.code(), rule.name(), detail)]
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Resolver;

    struct LongLines;

    impl Rule for LongLines {
        fn code(&self) -> &'static str {
            "MD013"
        }
        fn name(&self) -> &'static str {
            "line-length"
        }
        fn check(&self, doc: &Document, _params: &RuleParams) -> Vec<Violation> {
            doc.lines()
                .iter()
                .filter(|l| l.text.len() > 10)
                .map(|l| self.violation(l.number, "Line too long"))
                .collect()
        }
    }

    struct FirstLine;

    impl Rule for FirstLine {
        fn code(&self) -> &'static str {
            "MD041"
        }
        fn name(&self) -> &'static str {
            "first-line"
        }
        fn check(&self, _doc: &Document, _params: &RuleParams) -> Vec<Violation> {
            vec![self.violation(1, "First line")]
        }
    }

    struct Faulty;

    impl Rule for Faulty {
        fn code(&self) -> &'static str {
            "MD900"
        }
        fn name(&self) -> &'static str {
            "faulty"
        }
        fn check(&self, _doc: &Document, _params: &RuleParams) -> Vec<Violation> {
            panic!("index out of bounds");
        }
    }

    const TEXT: &str = "# Title\n\nshort\nthis line is long\n";

    #[test]
    fn violations_are_sorted_by_line_then_code() {
        let registry = Registry::new().with(LongLines).with(FirstLine);
        let engine = Engine::builder(&registry).build().unwrap();
        let keys: Vec<_> = engine
            .evaluate(&Document::parse(TEXT))
            .iter()
            .map(|v| (v.line, v.code.clone()))
            .collect();
        assert_eq!(
            keys,
            vec![(1, "MD041".to_string()), (4, "MD013".to_string())]
        );
    }

    #[test]
    fn registration_order_does_not_change_output() {
        let a = Registry::new().with(LongLines).with(FirstLine).with(Faulty);
        let b = Registry::new().with(Faulty).with(FirstLine).with(LongLines);
        let doc = Document::parse(TEXT);
        for parallel in [false, true] {
            let ea = Engine::builder(&a).parallel(parallel).build().unwrap();
            let eb = Engine::builder(&b).parallel(parallel).build().unwrap();
            assert_eq!(ea.evaluate(&doc), eb.evaluate(&doc));
        }
    }

    #[test]
    fn faulting_rule_yields_one_internal_error() {
        let registry = Registry::new().with(LongLines).with(Faulty);
        let engine = Engine::builder(&registry).build().unwrap();
        let evaluation = engine.evaluate(&Document::parse(TEXT));

        let faults: Vec<_> = evaluation.iter().filter(|v| v.is_internal_error()).collect();
        assert_eq!(faults.len(), 1);
        assert_eq!(faults[0].code, "MD900");
        assert!(faults[0].message.contains("index out of bounds"));
        assert!(evaluation.iter().any(|v| v.code == "MD013"));
        assert_eq!(evaluation.rules_run, 2);
    }

    #[test]
    fn disabled_rules_do_not_run() {
        let registry = Registry::new().with(LongLines).with(FirstLine);
        let policy = Resolver::new(&registry).resolve_str("all\nexclude_rule 'MD013'").unwrap();
        let engine = Engine::builder(&registry).policy(policy).build().unwrap();
        let evaluation = engine.evaluate(&Document::parse(TEXT));
        assert_eq!(evaluation.len(), 1);
        assert_eq!(evaluation.rules_run, 1);
    }

    #[test]
    fn evaluation_is_repeatable() {
        let registry = Registry::new().with(LongLines).with(FirstLine);
        let engine = Engine::builder(&registry).build().unwrap();
        let doc = Document::parse(TEXT);
        let first: Vec<_> = engine.evaluate(&doc).into_iter().collect();
        let second: Vec<_> = engine.evaluate(&doc).into_iter().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn policy_must_match_registry() {
        let small = Registry::new().with(FirstLine);
        let big = Registry::new().with(FirstLine).with(LongLines);

        let err = Engine::builder(&small)
            .policy(Policy::all_enabled(&big))
            .build()
            .err();
        assert!(matches!(err, Some(EngineError::UnregisteredRule(ref c)) if c == "MD013"));

        let err = Engine::builder(&big)
            .policy(Policy::all_enabled(&small))
            .build()
            .err();
        assert!(matches!(err, Some(EngineError::UncoveredRule(ref c)) if c == "MD013"));
    }

    #[test]
    fn elapsed_deadline_skips_rules_and_files() {
        let registry = Registry::new().with(LongLines).with(FirstLine);
        let engine = Engine::builder(&registry)
            .deadline(Some(Duration::ZERO))
            .build()
            .unwrap();

        let evaluation = engine.evaluate(&Document::parse(TEXT));
        assert!(evaluation.is_empty());
        assert_eq!(evaluation.rules_skipped, 2);

        let result = engine.lint_files(&[PathBuf::from("Cargo.toml")]);
        assert!(result.files.is_empty());
        assert_eq!(result.files_skipped, 1);
        assert!(result.deadline_exceeded);
    }

    #[test]
    fn unreadable_files_are_reported_per_file() {
        let registry = Registry::new().with(FirstLine);
        let engine = Engine::builder(&registry).threads(2).build().unwrap();
        let result = engine.lint_files(&[
            PathBuf::from("does/not/exist.md"),
            PathBuf::from("Cargo.toml"),
        ]);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].path, PathBuf::from("does/not/exist.md"));
        assert_eq!(result.files_checked(), 1);
        assert!(!result.deadline_exceeded);
    }

    #[test]
    fn lint_str_carries_parse_warnings() {
        let registry = Registry::new().with(FirstLine);
        let engine = Engine::builder(&registry).build().unwrap();
        let report = engine.lint_str("a.md", "```\nunclosed\n");
        assert_eq!(report.path, PathBuf::from("a.md"));
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.violations.len(), 1);
    }
}
