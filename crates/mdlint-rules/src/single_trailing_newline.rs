//! Rule requiring files to end with a newline.

use mdlint_core::{Document, Rule, RuleParams, Violation};

/// Rule code for single-trailing-newline.
pub const CODE: &str = "MD047";

/// Rule name for single-trailing-newline.
pub const NAME: &str = "single-trailing-newline";

const DESCRIPTION: &str = "File should end with a single newline character";

/// Flags non-empty files whose last line has no terminator.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleTrailingNewline;

impl Rule for SingleTrailingNewline {
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
        &["blank_lines"]
    }

    fn check(&self, doc: &Document, _params: &RuleParams) -> Vec<Violation> {
        let source = doc.source();
        if source.is_empty() || source.ends_with('\n') {
            return Vec::new();
        }
        let last = doc.lines().last().map_or(1, |l| l.number);
        vec![self.violation(last, DESCRIPTION)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::lines;

    #[test]
    fn test_detects_missing_newline() {
        assert_eq!(lines(&SingleTrailingNewline, "# Title\n\ntext"), vec![3]);
    }

    #[test]
    fn test_allows_terminated_and_empty_files() {
        assert!(lines(&SingleTrailingNewline, "text\n").is_empty());
        assert!(lines(&SingleTrailingNewline, "").is_empty());
    }
}
