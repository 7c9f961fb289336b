//! Rule requiring header levels to increase by at most one.
//!
//! # Rationale
//!
//! Skipping a level (`#` followed by `###`) breaks the document outline
//! that table-of-contents generators and screen readers rely on.
//! Decreasing by more than one level is fine.

use mdlint_core::{Document, Rule, RuleParams, Violation};

/// Rule code for header-increment.
pub const CODE: &str = "MD001";

/// Rule name for header-increment.
pub const NAME: &str = "header-increment";

const DESCRIPTION: &str = "Header levels should only increment by one level at a time";

/// Flags headings more than one level deeper than the previous heading.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderIncrement;

impl Rule for HeaderIncrement {
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
        &["headers"]
    }

    fn check(&self, doc: &Document, _params: &RuleParams) -> Vec<Violation> {
        let mut violations = Vec::new();
        let mut previous: Option<u8> = None;

        for (block, level, _, _) in doc.headings() {
            if let Some(prev) = previous {
                if level > prev + 1 {
                    violations.push(self.violation(
                        block.line,
                        format!("{DESCRIPTION} [Expected: h{}; Actual: h{level}]", prev + 1),
                    ));
                }
            }
            previous = Some(level);
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{check, lines};

    #[test]
    fn test_detects_skipped_level() {
        let violations = check(&HeaderIncrement, "# Title\n\n### Deep\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].code, CODE);
        assert_eq!(violations[0].line, 3);
        assert!(violations[0].message.ends_with("[Expected: h2; Actual: h3]"));
    }

    #[test]
    fn test_allows_stepwise_and_decreasing_levels() {
        let text = "# A\n\n## B\n\n### C\n\n#### D\n\n## E\n\n### F\n";
        assert!(lines(&HeaderIncrement, text).is_empty());
    }

    #[test]
    fn test_first_heading_may_be_any_level() {
        assert!(lines(&HeaderIncrement, "### Start\n\n#### Next\n").is_empty());
    }

    #[test]
    fn test_setext_headings_count() {
        assert_eq!(lines(&HeaderIncrement, "Title\n=====\n\n### Deep\n"), vec![4]);
    }
}
