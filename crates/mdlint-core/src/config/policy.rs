//! The resolved rule policy.

use crate::params::RuleParams;
use crate::registry::Registry;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

/// Whether a rule runs, and with which parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "params")]
pub enum RuleState {
    /// The rule runs with these parameters (defaults already filled).
    Enabled(RuleParams),
    /// The rule does not run.
    Disabled,
}

impl RuleState {
    /// Returns true for [`RuleState::Enabled`].
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled(_))
    }
}

/// A mapping from every rule code in a registry to its state.
///
/// Built once per run by the [`Resolver`](super::Resolver) and only read
/// afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Policy {
    rules: BTreeMap<String, RuleState>,
}

impl Policy {
    pub(crate) fn from_states(rules: BTreeMap<String, RuleState>) -> Self {
        Self { rules }
    }

    /// Every rule in `registry` enabled at its defaults.
    #[must_use]
    pub fn all_enabled(registry: &Registry) -> Self {
        Self::from_states(
            registry
                .iter()
                .map(|r| {
                    (
                        r.code().to_string(),
                        RuleState::Enabled(RuleParams::defaults(r.params())),
                    )
                })
                .collect(),
        )
    }

    /// State of `code`, if the policy knows it.
    #[must_use]
    pub fn state(&self, code: &str) -> Option<&RuleState> {
        self.rules.get(code)
    }

    /// Returns true when `code` is enabled.
    #[must_use]
    pub fn is_enabled(&self, code: &str) -> bool {
        self.state(code).is_some_and(RuleState::is_enabled)
    }

    /// Parameters of an enabled rule.
    #[must_use]
    pub fn params(&self, code: &str) -> Option<&RuleParams> {
        match self.state(code) {
            Some(RuleState::Enabled(params)) => Some(params),
            _ => None,
        }
    }

    /// Iterates over enabled rules in code order.
    pub fn enabled(&self) -> impl Iterator<Item = (&str, &RuleParams)> {
        self.rules.iter().filter_map(|(code, state)| match state {
            RuleState::Enabled(params) => Some((code.as_str(), params)),
            RuleState::Disabled => None,
        })
    }

    /// Iterates over every `(code, state)` in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleState)> {
        self.rules.iter().map(|(code, state)| (code.as_str(), state))
    }

    /// Number of rules covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true when the policy covers no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Disables every rule whose code is not in `codes`.
    ///
    /// Codes compare case-insensitively.
    #[must_use]
    pub fn restrict_to<S: AsRef<str>>(mut self, codes: &[S]) -> Self {
        let keep: BTreeSet<String> = codes
            .iter()
            .map(|c| c.as_ref().to_ascii_uppercase())
            .collect();
        for (code, state) in &mut self.rules {
            if !keep.contains(code) {
                *state = RuleState::Disabled;
            }
        }
        self
    }

    /// Renders the policy in style-file syntax.
    ///
    /// Every rule gets an explicit line, so resolving the output against
    /// the same registry yields an equal policy.
    #[must_use]
    pub fn to_directives(&self) -> String {
        let mut out = String::new();
        for (code, state) in &self.rules {
            match state {
                RuleState::Enabled(params) => {
                    let _ = write!(out, "rule '{code}'");
                    for (name, value) in params.iter() {
                        let _ = write!(out, ", :{name} => {}", value.to_directive_syntax());
                    }
                    out.push('\n');
                }
                RuleState::Disabled => {
                    let _ = writeln!(out, "exclude_rule '{code}'");
                }
            }
        }
        out
    }
}
