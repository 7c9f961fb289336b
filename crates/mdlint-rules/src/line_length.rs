//! Rule limiting line length.
//!
//! # Configuration
//!
//! - `line_length`: maximum characters per line (default: 80)
//! - `code_blocks`: also check code blocks (default: true)
//! - `tables`: also check tables (default: true)
//!
//! Lines with no whitespace beyond the limit, such as a long URL, are
//! allowed since they cannot be wrapped.

use mdlint_core::{Document, ParamSpec, Rule, RuleParams, Violation};

/// Rule code for line-length.
pub const CODE: &str = "MD013";

/// Rule name for line-length.
pub const NAME: &str = "line-length";

const DESCRIPTION: &str = "Line length";

const PARAMS: &[ParamSpec] = &[
    ParamSpec::integer("line_length", 80),
    ParamSpec::boolean("code_blocks", true),
    ParamSpec::boolean("tables", true),
];

/// Flags lines longer than `line_length` characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineLength;

impl Rule for LineLength {
    fn code(&self) -> &'static str {
        CODE
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        DESCRIPTION
    }

    fn tags(&self) -> &'static [&'static str] {
        &["line_length"]
    }

    fn params(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn check(&self, doc: &Document, params: &RuleParams) -> Vec<Violation> {
        let limit = params.get_usize("line_length", 80);
        let code_blocks = params.get_bool("code_blocks", true);
        let tables = params.get_bool("tables", true);

        doc.lines()
            .iter()
            .filter(|l| !l.in_front_matter)
            .filter(|l| code_blocks || !l.in_code)
            .filter(|l| tables || !l.in_table)
            .filter_map(|l| {
                let length = l.text.chars().count();
                let wrappable = l.text.chars().skip(limit).any(char::is_whitespace);
                (length > limit && wrappable).then(|| {
                    self.violation(
                        l.number,
                        format!("{DESCRIPTION} [Expected: {limit}; Actual: {length}]"),
                    )
                    .with_column(limit + 1)
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{check, check_with};
    use mdlint_core::ParamValue;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_detects_long_line() {
        let text = format!("{}\nshort\n", words(20));
        let violations = check(&LineLength, &text);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, 1);
        assert_eq!(violations[0].column, Some(81));
        assert!(violations[0].message.ends_with("[Expected: 80; Actual: 99]"));
    }

    #[test]
    fn test_allows_unbreakable_tail() {
        let text = format!("see https://example.com/{}\n", "a".repeat(100));
        assert!(check(&LineLength, &text).is_empty());
    }

    #[test]
    fn test_code_and_tables_can_be_skipped() {
        let long = words(20);
        let text = format!("```\n{long}\n```\n\n| a | b |\n|---|---|\n| {long} | x |\n");
        assert_eq!(check(&LineLength, &text).len(), 2);

        let skip = [
            ("code_blocks", ParamValue::Boolean(false)),
            ("tables", ParamValue::Boolean(false)),
        ];
        assert!(check_with(&LineLength, &text, &skip).is_empty());
    }

    #[test]
    fn test_limit_is_configurable() {
        let text = format!("{}\n", words(20));
        let wide = [("line_length", ParamValue::Integer(120))];
        assert!(check_with(&LineLength, &text, &wide).is_empty());
    }
}
