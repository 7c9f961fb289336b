//! Rule allowing one top-level heading per document.
//!
//! # Configuration
//!
//! - `level`: heading level treated as the title (default: 1)

use mdlint_core::{Document, ParamSpec, Rule, RuleParams, Violation};

/// Rule code for single-h1.
pub const CODE: &str = "MD025";

/// Rule name for single-h1.
pub const NAME: &str = "single-h1";

const DESCRIPTION: &str = "Multiple top level headers in the same document";

const PARAMS: &[ParamSpec] = &[ParamSpec::integer("level", 1)];

/// Flags every title-level heading after the first.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleH1;

impl Rule for SingleH1 {
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

    fn params(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn check(&self, doc: &Document, params: &RuleParams) -> Vec<Violation> {
        let level = params.get_int("level", 1);

        doc.headings()
            .filter(|(_, l, _, _)| i64::from(*l) == level)
            .skip(1)
            .map(|(block, ..)| self.violation(block.line, DESCRIPTION))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{check_with, lines};
    use mdlint_core::ParamValue;

    #[test]
    fn test_detects_second_title() {
        assert_eq!(lines(&SingleH1, "# One\n\n## Sub\n\n# Two\n\n# Three\n"), vec![5, 7]);
    }

    #[test]
    fn test_single_title_is_fine() {
        assert!(lines(&SingleH1, "# One\n\n## A\n\n## B\n").is_empty());
    }

    #[test]
    fn test_level_is_configurable() {
        let violations = check_with(
            &SingleH1,
            "# One\n\n# Two\n\n## A\n\n## B\n",
            &[("level", ParamValue::Integer(2))],
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, 7);
    }
}
