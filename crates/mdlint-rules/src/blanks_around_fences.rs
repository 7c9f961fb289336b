//! Rule requiring blank lines around fenced code blocks.

use crate::util::{separated_after, separated_before};
use mdlint_core::{BlockKind, Document, Rule, RuleParams, Violation};

/// Rule code for blanks-around-fences.
pub const CODE: &str = "MD031";

/// Rule name for blanks-around-fences.
pub const NAME: &str = "blanks-around-fences";

const DESCRIPTION: &str = "Fenced code blocks should be surrounded by blank lines";

/// Flags fenced code blocks touching other content.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlanksAroundFences;

impl Rule for BlanksAroundFences {
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
        &["code", "blank_lines"]
    }

    fn check(&self, doc: &Document, _params: &RuleParams) -> Vec<Violation> {
        let blocks = doc.blocks();

        doc.code_blocks()
            .filter(|b| matches!(b.kind, BlockKind::CodeFence { .. }))
            .filter(|b| {
                // A fence opening a list item starts on the item's own line.
                let opens_item = b
                    .parent
                    .and_then(|p| blocks.get(p))
                    .is_some_and(|item| item.line == b.line);
                let before = opens_item || separated_before(doc, b.line);
                !(before && separated_after(doc, b.end_line))
            })
            .map(|b| self.violation(b.line, DESCRIPTION))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::lines;

    #[test]
    fn test_detects_touching_fences() {
        assert_eq!(lines(&BlanksAroundFences, "Text\n```\ncode\n```\n"), vec![2]);
        assert_eq!(lines(&BlanksAroundFences, "```\ncode\n```\nText\n"), vec![1]);
    }

    #[test]
    fn test_allows_separated_fences() {
        let text = "Text\n\n```\ncode\n```\n\nMore\n";
        assert!(lines(&BlanksAroundFences, text).is_empty());
    }

    #[test]
    fn test_indented_code_is_not_a_fence() {
        assert!(lines(&BlanksAroundFences, "Text\n\n    code\nMore\n").is_empty());
    }

    #[test]
    fn test_fence_inside_list_item() {
        let text = "- item\n\n  ```\n  code\n  ```\n\n- next\n";
        assert!(lines(&BlanksAroundFences, text).is_empty());
        assert_eq!(lines(&BlanksAroundFences, "- item\n  ```\n  code\n  ```\n"), vec![2]);
    }
}
