//! Rule limiting runs of blank lines.
//!
//! # Configuration
//!
//! - `maximum`: consecutive blank lines allowed (default: 1)
//!
//! Blank lines inside code blocks and front matter are not counted.

use mdlint_core::{Document, ParamSpec, Rule, RuleParams, Violation};

/// Rule code for no-multiple-blanks.
pub const CODE: &str = "MD012";

/// Rule name for no-multiple-blanks.
pub const NAME: &str = "no-multiple-blanks";

const DESCRIPTION: &str = "Multiple consecutive blank lines";

const PARAMS: &[ParamSpec] = &[ParamSpec::integer("maximum", 1)];

/// Flags each blank line beyond the allowed run length.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMultipleBlanks;

impl Rule for NoMultipleBlanks {
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
        &["whitespace", "blank_lines"]
    }

    fn params(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn check(&self, doc: &Document, params: &RuleParams) -> Vec<Violation> {
        let maximum = params.get_usize("maximum", 1);
        let mut violations = Vec::new();
        let mut run = 0;

        for line in doc.lines() {
            if line.blank && !line.in_code && !line.in_front_matter {
                run += 1;
                if run > maximum {
                    violations.push(self.violation(
                        line.number,
                        format!("{DESCRIPTION} [Expected: {maximum}; Actual: {run}]"),
                    ));
                }
            } else {
                run = 0;
            }
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{check_with, lines};
    use mdlint_core::ParamValue;

    #[test]
    fn test_detects_double_blank() {
        assert_eq!(lines(&NoMultipleBlanks, "a\n\n\nb\n"), vec![3]);
        assert_eq!(lines(&NoMultipleBlanks, "a\n\n\n\nb\n"), vec![3, 4]);
    }

    #[test]
    fn test_ignores_code_blocks() {
        assert!(lines(&NoMultipleBlanks, "```\na\n\n\nb\n```\n").is_empty());
    }

    #[test]
    fn test_maximum_is_configurable() {
        let text = "a\n\n\nb\n";
        let two = [("maximum", ParamValue::Integer(2))];
        assert!(check_with(&NoMultipleBlanks, text, &two).is_empty());
    }
}
