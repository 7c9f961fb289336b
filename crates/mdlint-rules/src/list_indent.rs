//! Rule requiring items of one list to start at the same column.

use mdlint_core::{Document, Rule, RuleParams, Violation};

/// Rule code for list-indent.
pub const CODE: &str = "MD005";

/// Rule name for list-indent.
pub const NAME: &str = "list-indent";

const DESCRIPTION: &str = "Inconsistent indentation for list items at the same level";

/// Flags list items indented differently from the first item of their list.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListIndent;

impl Rule for ListIndent {
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
        &["bullet", "ul", "indentation"]
    }

    fn check(&self, doc: &Document, _params: &RuleParams) -> Vec<Violation> {
        let blocks = doc.blocks();
        let mut violations = Vec::new();

        for list in doc.lists() {
            let Some(first) = list.items.first().and_then(|&i| blocks.get(i)) else {
                continue;
            };
            for item in list.items.iter().skip(1).filter_map(|&i| blocks.get(i)) {
                if item.column != first.column {
                    violations.push(
                        self.violation(
                            item.line,
                            format!(
                                "{DESCRIPTION} [Expected: {}; Actual: {}]",
                                first.column, item.column
                            ),
                        )
                        .with_column(item.column + 1),
                    );
                }
            }
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{check, lines};

    #[test]
    fn test_detects_shifted_sibling() {
        let violations = check(&ListIndent, "- a\n - b\n- c\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, 2);
        assert!(violations[0].message.ends_with("[Expected: 0; Actual: 1]"));
    }

    #[test]
    fn test_nested_lists_are_separate() {
        assert!(lines(&ListIndent, "- a\n  - b\n  - c\n- d\n").is_empty());
    }

    #[test]
    fn test_ordered_lists_checked_too() {
        assert_eq!(lines(&ListIndent, "1. a\n 2. b\n"), vec![2]);
    }
}
