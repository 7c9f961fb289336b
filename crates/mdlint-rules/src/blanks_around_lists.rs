//! Rule requiring blank lines around top-level lists.

use crate::util::{separated_after, separated_before};
use mdlint_core::{Document, Rule, RuleParams, Violation};

/// Rule code for blanks-around-lists.
pub const CODE: &str = "MD032";

/// Rule name for blanks-around-lists.
pub const NAME: &str = "blanks-around-lists";

const DESCRIPTION: &str = "Lists should be surrounded by blank lines";

/// Flags lists touching preceding or following content.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlanksAroundLists;

impl Rule for BlanksAroundLists {
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
        &["bullet", "ul", "ol", "blank_lines"]
    }

    fn check(&self, doc: &Document, _params: &RuleParams) -> Vec<Violation> {
        let mut violations = Vec::new();

        for list in doc.lists().iter().filter(|l| l.depth == 0) {
            if !separated_before(doc, list.line) {
                violations.push(self.violation(list.line, DESCRIPTION));
            }

            // Trailing blank lines may belong to the list's range.
            let mut last = list.end_line;
            while last > list.line && doc.is_blank(last) {
                last -= 1;
            }
            if !separated_after(doc, last) {
                violations.push(self.violation(last, DESCRIPTION));
            }
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::lines;

    #[test]
    fn test_detects_list_after_text() {
        assert_eq!(lines(&BlanksAroundLists, "Intro:\n- a\n- b\n"), vec![2]);
    }

    #[test]
    fn test_detects_content_after_list() {
        assert_eq!(lines(&BlanksAroundLists, "- a\n- b\n# Next\n"), vec![2]);
        assert_eq!(lines(&BlanksAroundLists, "1. a\n---\n"), vec![1]);
    }

    #[test]
    fn test_allows_separated_lists() {
        let text = "Intro:\n\n- a\n- b\n\nOutro\n\n1. one\n";
        assert!(lines(&BlanksAroundLists, text).is_empty());
    }

    #[test]
    fn test_nested_lists_are_not_checked() {
        assert!(lines(&BlanksAroundLists, "- a\n  - b\n- c\n").is_empty());
    }
}
