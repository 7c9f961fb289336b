//! Rule forbidding trailing whitespace.
//!
//! # Configuration
//!
//! - `br_spaces`: exact number of trailing spaces allowed as a hard line
//!   break (default: 2). Values below 2 disable the exemption.

use mdlint_core::{Document, ParamSpec, Rule, RuleParams, Violation};

/// Rule code for no-trailing-spaces.
pub const CODE: &str = "MD009";

/// Rule name for no-trailing-spaces.
pub const NAME: &str = "no-trailing-spaces";

const DESCRIPTION: &str = "Trailing spaces";

const PARAMS: &[ParamSpec] = &[ParamSpec::integer("br_spaces", 2)];

/// Flags lines ending in spaces or tabs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrailingSpaces;

impl Rule for NoTrailingSpaces {
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
        &["whitespace"]
    }

    fn params(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn check(&self, doc: &Document, params: &RuleParams) -> Vec<Violation> {
        let br_spaces = params.get_usize("br_spaces", 2);
        let mut violations = Vec::new();

        for line in doc.lines().iter().filter(|l| !l.in_front_matter) {
            let content = line.text.trim_end_matches([' ', '\t']);
            let trailing = &line.text[content.len()..];
            if trailing.is_empty() {
                continue;
            }
            let hard_break = br_spaces >= 2
                && !line.blank
                && !line.in_code
                && trailing.len() == br_spaces
                && trailing.bytes().all(|b| b == b' ');
            if hard_break {
                continue;
            }
            let expected = if br_spaces >= 2 {
                format!("0 or {br_spaces}")
            } else {
                "0".to_string()
            };
            violations.push(
                self.violation(
                    line.number,
                    format!("{DESCRIPTION} [Expected: {expected}; Actual: {}]", trailing.len()),
                )
                .with_column(content.len() + 1),
            );
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{check, check_with, lines};
    use mdlint_core::ParamValue;

    #[test]
    fn test_detects_trailing_space() {
        let violations = check(&NoTrailingSpaces, "text \nclean\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, 1);
        assert_eq!(violations[0].column, Some(5));
    }

    #[test]
    fn test_allows_hard_break() {
        assert!(lines(&NoTrailingSpaces, "line one  \nline two\n").is_empty());
        assert_eq!(lines(&NoTrailingSpaces, "line one   \nline two\n"), vec![1]);
    }

    #[test]
    fn test_whitespace_only_lines_and_tabs() {
        assert_eq!(lines(&NoTrailingSpaces, "a\n  \nb\t\n"), vec![2, 3]);
    }

    #[test]
    fn test_zero_br_spaces_disables_exemption() {
        let violations = check_with(
            &NoTrailingSpaces,
            "line  \n",
            &[("br_spaces", ParamValue::Integer(0))],
        );
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("Expected: 0;"));
    }
}
