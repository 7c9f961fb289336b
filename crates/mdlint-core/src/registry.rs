//! Catalog of available rules.

use crate::rule::{Rule, RuleBox};
use std::collections::BTreeMap;
use std::fmt;

/// An ordered catalog of rules keyed by code.
///
/// Lookups accept the code (case-insensitive) or the alias.
#[derive(Default)]
pub struct Registry {
    rules: Vec<RuleBox>,
    by_code: BTreeMap<String, usize>,
    by_alias: BTreeMap<String, usize>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule and returns the registry.
    #[must_use]
    pub fn with<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.register(Box::new(rule));
        self
    }

    /// Adds a boxed rule.
    ///
    /// Registering a code twice replaces the earlier rule.
    pub fn register(&mut self, rule: RuleBox) {
        let code = rule.code().to_ascii_uppercase();
        let alias = rule.name().to_string();
        if let Some(&existing) = self.by_code.get(&code) {
            tracing::warn!("Rule {} registered twice; keeping the later one", code);
            self.by_alias.retain(|_, i| *i != existing);
            self.rules[existing] = rule;
            self.by_alias.insert(alias, existing);
            return;
        }
        self.rules.push(rule);
        let index = self.rules.len() - 1;
        self.by_code.insert(code, index);
        self.by_alias.insert(alias, index);
    }

    /// Returns the rule with `code`.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&dyn Rule> {
        self.by_code
            .get(&code.to_ascii_uppercase())
            .map(|&i| self.rules[i].as_ref())
    }

    /// Returns the rule referred to by code or alias.
    #[must_use]
    pub fn lookup(&self, reference: &str) -> Option<&dyn Rule> {
        self.get(reference).or_else(|| {
            self.by_alias
                .get(reference)
                .map(|&i| self.rules[i].as_ref())
        })
    }

    /// Iterates over rules carrying `tag`.
    pub fn with_tag<'a>(&'a self, tag: &str) -> impl Iterator<Item = &'a dyn Rule> + 'a {
        let tag = tag.to_owned();
        self.iter().filter(move |r| r.tags().contains(&tag.as_str()))
    }

    /// Iterates over rules in code order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Rule> {
        self.by_code.values().map(|&i| self.rules[i].as_ref())
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true when no rules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.by_code.keys()).finish()
    }
}
