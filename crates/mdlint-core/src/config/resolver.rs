//! Folds directives into a [`Policy`].

use super::directive::{parse_directives, Directive, DirectiveLine};
use super::policy::{Policy, RuleState};
use super::ConfigError;
use crate::params::{Literal, ParamValue, RuleParams};
use crate::registry::Registry;
use crate::rule::Rule;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::{debug, warn};

/// Resolves style-file directives against a registry.
///
/// Resolution order:
///
/// 1. `all` sets the baseline to every rule; without it nothing is enabled.
/// 2. `rule` and `tag` enable rules in file order. Options given to `rule`
///    merge into that rule's overrides, later values winning.
/// 3. `exclude_rule` and `exclude_tag` apply last and always win.
///
/// Unknown ids and tags fail in strict mode and are skipped with a warning
/// in lenient mode. Option errors fail in both modes.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'r> {
    registry: &'r Registry,
    lenient: bool,
}

impl<'r> Resolver<'r> {
    /// Creates a strict resolver.
    #[must_use]
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            lenient: false,
        }
    }

    /// Sets lenient mode.
    #[must_use]
    pub fn lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    /// Parses and resolves style-file text.
    ///
    /// # Errors
    ///
    /// Returns the first syntax or resolution error.
    pub fn resolve_str(&self, text: &str) -> Result<Policy, ConfigError> {
        self.resolve(&parse_directives(text)?)
    }

    /// Reads, parses and resolves a style file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not resolve.
    pub fn resolve_file(&self, path: &Path) -> Result<Policy, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        debug!("Resolving style file {}", path.display());
        self.resolve_str(&text)
    }

    /// Resolves parsed directives.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for unknown references (strict mode only)
    /// and for invalid options.
    pub fn resolve(&self, directives: &[DirectiveLine]) -> Result<Policy, ConfigError> {
        let mut enabled: BTreeMap<&'static str, BTreeMap<String, ParamValue>> = BTreeMap::new();
        let mut excluded: BTreeSet<&'static str> = BTreeSet::new();

        for DirectiveLine { line, directive } in directives {
            let line = *line;
            match directive {
                Directive::All => {
                    for rule in self.registry.iter() {
                        enabled.entry(rule.code()).or_default();
                    }
                }
                Directive::Rule { id, options } => {
                    let Some(rule) = self.rule(line, id)? else {
                        continue;
                    };
                    let bag = enabled.entry(rule.code()).or_default();
                    for (name, literal) in options {
                        let value = check_option(line, rule, name, literal)?;
                        bag.insert(name.clone(), value);
                    }
                }
                Directive::ExcludeRule { id } => {
                    if let Some(rule) = self.rule(line, id)? {
                        excluded.insert(rule.code());
                    }
                }
                Directive::Tag { tag } => {
                    for rule in self.tagged(line, tag)? {
                        enabled.entry(rule.code()).or_default();
                    }
                }
                Directive::ExcludeTag { tag } => {
                    for rule in self.tagged(line, tag)? {
                        excluded.insert(rule.code());
                    }
                }
            }
        }

        let states: BTreeMap<String, RuleState> = self
            .registry
            .iter()
            .map(|rule| {
                let code = rule.code();
                let state = match enabled.get(code) {
                    Some(overrides) if !excluded.contains(code) => {
                        RuleState::Enabled(RuleParams::with_overrides(rule.params(), overrides))
                    }
                    _ => RuleState::Disabled,
                };
                (code.to_string(), state)
            })
            .collect();

        let policy = Policy::from_states(states);
        debug!(
            "Resolved policy: {} of {} rules enabled",
            policy.enabled().count(),
            policy.len()
        );
        Ok(policy)
    }

    fn rule(&self, line: usize, id: &str) -> Result<Option<&'r dyn Rule>, ConfigError> {
        match self.registry.lookup(id) {
            Some(rule) => Ok(Some(rule)),
            None if self.lenient => {
                warn!("Style file line {}: skipping unknown rule '{}'", line, id);
                Ok(None)
            }
            None => Err(ConfigError::UnknownRule {
                line,
                id: id.to_string(),
            }),
        }
    }

    fn tagged(&self, line: usize, tag: &str) -> Result<Vec<&'r dyn Rule>, ConfigError> {
        let rules: Vec<&'r dyn Rule> = self.registry.with_tag(tag).collect();
        if !rules.is_empty() {
            return Ok(rules);
        }
        if self.lenient {
            warn!("Style file line {}: skipping unknown tag '{}'", line, tag);
            Ok(rules)
        } else {
            Err(ConfigError::UnknownTag {
                line,
                tag: tag.to_string(),
            })
        }
    }
}

fn check_option(
    line: usize,
    rule: &dyn Rule,
    name: &str,
    literal: &Literal,
) -> Result<ParamValue, ConfigError> {
    let specs = rule.params();
    let Some(spec) = specs.iter().find(|s| s.name == name) else {
        let known = (!specs.is_empty()).then(|| {
            let names: Vec<_> = specs.iter().map(|s| s.name).collect();
            format!("{} accepts: {}", rule.code(), names.join(", "))
        });
        return Err(ConfigError::UnknownParameter {
            line,
            rule: rule.code().to_string(),
            option: name.to_string(),
            known,
        });
    };
    spec.coerce(literal)
        .map_err(|expected| ConfigError::TypeMismatch {
            line,
            rule: rule.code().to_string(),
            option: name.to_string(),
            expected,
            found: literal.describe(),
        })
}
