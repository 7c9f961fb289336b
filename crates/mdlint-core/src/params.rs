//! Typed rule parameters and their schema.
//!
//! Each rule declares a closed set of [`ParamSpec`]s. Values written in a
//! style file arrive as [`Literal`]s and are coerced against the schema
//! while the policy is resolved, so rules only ever see well-typed
//! [`RuleParams`].

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Declared type of a rule parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Signed integer.
    Integer,
    /// `true` / `false`.
    Boolean,
    /// Free-form text.
    String,
    /// One of a fixed set of names.
    Enum(&'static [&'static str]),
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => write!(f, "an integer"),
            Self::Boolean => write!(f, "a boolean"),
            Self::String => write!(f, "a string"),
            Self::Enum(values) => write!(f, "one of {}", values.join(", ")),
        }
    }
}

/// A resolved, schema-checked parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Integer value.
    Integer(i64),
    /// Boolean value.
    Boolean(bool),
    /// String value.
    String(String),
    /// Enumerated value.
    Enum(String),
}

impl ParamValue {
    /// Renders the value in style-file syntax.
    #[must_use]
    pub fn to_directive_syntax(&self) -> String {
        match self {
            Self::Integer(n) => n.to_string(),
            Self::Boolean(b) => b.to_string(),
            Self::String(s) => quote(s),
            Self::Enum(s) => format!(":{s}"),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::String(s) | Self::Enum(s) => write!(f, "{s}"),
        }
    }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\'' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

/// A value as written in a style file, before schema checking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// `4`, `-1`
    Integer(i64),
    /// `true`, `false`
    Boolean(bool),
    /// `'text'`, `"text"`
    Str(String),
    /// `:name`
    Symbol(String),
}

impl Literal {
    /// Short description used in type mismatch errors.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Integer(n) => format!("integer {n}"),
            Self::Boolean(b) => format!("boolean {b}"),
            Self::Str(s) => format!("string '{s}'"),
            Self::Symbol(s) => format!("symbol :{s}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParamDefault {
    Integer(i64),
    Boolean(bool),
    Text(&'static str),
}

/// Schema entry for one rule parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    /// Option name as used in style files.
    pub name: &'static str,
    /// Declared type.
    pub kind: ParamKind,
    default: ParamDefault,
}

impl ParamSpec {
    /// Integer parameter.
    #[must_use]
    pub const fn integer(name: &'static str, default: i64) -> Self {
        Self {
            name,
            kind: ParamKind::Integer,
            default: ParamDefault::Integer(default),
        }
    }

    /// Boolean parameter.
    #[must_use]
    pub const fn boolean(name: &'static str, default: bool) -> Self {
        Self {
            name,
            kind: ParamKind::Boolean,
            default: ParamDefault::Boolean(default),
        }
    }

    /// String parameter.
    #[must_use]
    pub const fn string(name: &'static str, default: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::String,
            default: ParamDefault::Text(default),
        }
    }

    /// Enumerated parameter; `default` should be one of `values`.
    #[must_use]
    pub const fn enumeration(
        name: &'static str,
        values: &'static [&'static str],
        default: &'static str,
    ) -> Self {
        Self {
            name,
            kind: ParamKind::Enum(values),
            default: ParamDefault::Text(default),
        }
    }

    /// The default value.
    #[must_use]
    pub fn default_value(&self) -> ParamValue {
        match (self.kind, self.default) {
            (_, ParamDefault::Integer(n)) => ParamValue::Integer(n),
            (_, ParamDefault::Boolean(b)) => ParamValue::Boolean(b),
            (ParamKind::Enum(_), ParamDefault::Text(s)) => ParamValue::Enum(s.to_string()),
            (_, ParamDefault::Text(s)) => ParamValue::String(s.to_string()),
        }
    }

    /// Coerces a written literal to this parameter's type.
    ///
    /// Symbols and strings are interchangeable for string and enum
    /// parameters.
    ///
    /// # Errors
    ///
    /// Returns the expected type description when the literal does not fit.
    pub fn coerce(&self, literal: &Literal) -> Result<ParamValue, String> {
        match (self.kind, literal) {
            (ParamKind::Integer, Literal::Integer(n)) => Ok(ParamValue::Integer(*n)),
            (ParamKind::Boolean, Literal::Boolean(b)) => Ok(ParamValue::Boolean(*b)),
            (ParamKind::String, Literal::Str(s) | Literal::Symbol(s)) => {
                Ok(ParamValue::String(s.clone()))
            }
            (ParamKind::Enum(values), Literal::Str(s) | Literal::Symbol(s))
                if values.contains(&s.as_str()) =>
            {
                Ok(ParamValue::Enum(s.clone()))
            }
            (kind, _) => Err(kind.to_string()),
        }
    }
}

/// The full parameter set one rule is evaluated with.
///
/// Built by filling the rule's defaults and applying validated overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RuleParams(BTreeMap<String, ParamValue>);

impl RuleParams {
    /// Parameters with every default from `specs`.
    #[must_use]
    pub fn defaults(specs: &[ParamSpec]) -> Self {
        Self(
            specs
                .iter()
                .map(|s| (s.name.to_string(), s.default_value()))
                .collect(),
        )
    }

    /// Defaults from `specs` with `overrides` applied on top.
    #[must_use]
    pub fn with_overrides(specs: &[ParamSpec], overrides: &BTreeMap<String, ParamValue>) -> Self {
        let mut params = Self::defaults(specs);
        for (k, v) in overrides {
            params.0.insert(k.clone(), v.clone());
        }
        params
    }

    /// Sets a value directly.
    #[must_use]
    pub fn set(mut self, key: impl Into<String>, value: ParamValue) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    /// Returns a raw value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    /// Gets an integer parameter with a fallback.
    #[must_use]
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        match self.0.get(key) {
            Some(ParamValue::Integer(n)) => *n,
            _ => default,
        }
    }

    /// Gets a non-negative integer parameter as `usize`.
    #[must_use]
    pub fn get_usize(&self, key: &str, default: usize) -> usize {
        usize::try_from(self.get_int(key, i64::try_from(default).unwrap_or(i64::MAX)))
            .unwrap_or(default)
    }

    /// Gets a boolean parameter with a fallback.
    #[must_use]
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.0.get(key) {
            Some(ParamValue::Boolean(b)) => *b,
            _ => default,
        }
    }

    /// Gets a string or enum parameter with a fallback.
    #[must_use]
    pub fn get_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        match self.0.get(key) {
            Some(ParamValue::String(s) | ParamValue::Enum(s)) => s,
            _ => default,
        }
    }

    /// Iterates over `(name, value)` in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns true when there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLES: &[&str] = &["consistent", "atx"];

    #[test]
    fn defaults_are_filled() {
        let params = RuleParams::defaults(&[
            ParamSpec::integer("indent", 2),
            ParamSpec::enumeration("style", STYLES, "consistent"),
        ]);
        assert_eq!(params.get_int("indent", 0), 2);
        assert_eq!(params.get("style"), Some(&ParamValue::Enum("consistent".into())));
    }

    #[test]
    fn overrides_replace_only_named_values() {
        let specs = [
            ParamSpec::integer("line_length", 80),
            ParamSpec::boolean("code_blocks", true),
        ];
        let mut overrides = BTreeMap::new();
        overrides.insert("line_length".to_string(), ParamValue::Integer(120));
        let params = RuleParams::with_overrides(&specs, &overrides);
        assert_eq!(params.get_int("line_length", 0), 120);
        assert!(params.get_bool("code_blocks", false));
    }

    #[test]
    fn coerce_checks_types() {
        let indent = ParamSpec::integer("indent", 2);
        assert_eq!(indent.coerce(&Literal::Integer(4)), Ok(ParamValue::Integer(4)));
        assert_eq!(
            indent.coerce(&Literal::Str("4".into())),
            Err("an integer".to_string())
        );
    }

    #[test]
    fn coerce_enum_accepts_symbols_and_rejects_unknown_names() {
        let style = ParamSpec::enumeration("style", STYLES, "consistent");
        assert_eq!(
            style.coerce(&Literal::Symbol("atx".into())),
            Ok(ParamValue::Enum("atx".into()))
        );
        assert_eq!(
            style.coerce(&Literal::Str("setext".into())),
            Err("one of consistent, atx".to_string())
        );
    }

    #[test]
    fn directive_syntax_quotes_strings() {
        assert_eq!(ParamValue::String("it's".into()).to_directive_syntax(), r"'it\'s'");
        assert_eq!(ParamValue::Enum("atx".into()).to_directive_syntax(), ":atx");
        assert_eq!(ParamValue::Integer(-3).to_directive_syntax(), "-3");
    }

    #[test]
    fn getters_fall_back_on_wrong_type() {
        let params = RuleParams::default().set("x", ParamValue::Boolean(true));
        assert_eq!(params.get_int("x", 7), 7);
        assert_eq!(params.get_str("x", "d"), "d");
        assert_eq!(params.get_usize("missing", 3), 3);
    }
}
