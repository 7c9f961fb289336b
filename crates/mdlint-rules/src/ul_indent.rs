//! Rule for unordered list indentation.
//!
//! # Rationale
//!
//! Nested bullets indented by a fixed step render the same in every
//! Markdown implementation and read well as plain text.
//!
//! # Configuration
//!
//! - `indent`: indentation step in columns (default: 2)
//!
//! Each unordered item's indent, measured from its parent item's marker
//! (or from the enclosing container for top-level items), must be an exact
//! multiple of `indent`. Tabs are expanded before measuring. Items nested
//! under an ordered list are left alone, since their indent follows the
//! width of the number.

use mdlint_core::{BlockKind, Document, ParamSpec, Rule, RuleParams, Violation};

/// Rule code for ul-indent.
pub const CODE: &str = "MD007";

/// Rule name for ul-indent.
pub const NAME: &str = "ul-indent";

const DESCRIPTION: &str = "Unordered list indentation";

const PARAMS: &[ParamSpec] = &[ParamSpec::integer("indent", 2)];

fn is_unordered_item(kind: &BlockKind) -> bool {
    matches!(kind, BlockKind::ListItem { ordered: false, .. })
}

/// Flags unordered list items not indented by a multiple of `indent`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UlIndent;

impl Rule for UlIndent {
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

    fn params(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn check(&self, doc: &Document, params: &RuleParams) -> Vec<Violation> {
        let step = params.get_usize("indent", 2).max(1);

        doc.blocks()
            .iter()
            .enumerate()
            .filter(|(i, block)| {
                is_unordered_item(&block.kind)
                    && doc.ancestors(*i).all(|a| is_unordered_item(&a.kind))
            })
            .filter(|(_, block)| block.indent % step != 0)
            .map(|(_, block)| {
                self.violation(
                    block.line,
                    format!(
                        "{DESCRIPTION} [Expected: multiple of {step}; Actual: {}]",
                        block.indent
                    ),
                )
                .with_column(block.column + 1)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{check, check_with, lines};
    use mdlint_core::ParamValue;

    fn indent(n: i64) -> [(&'static str, ParamValue); 1] {
        [("indent", ParamValue::Integer(n))]
    }

    #[test]
    fn test_default_two_spaces() {
        assert!(lines(&UlIndent, "- a\n  - b\n    - c\n").is_empty());
        let violations = check(&UlIndent, "- a\n   - b\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, 2);
        assert_eq!(violations[0].column, Some(4));
        assert!(violations[0].message.ends_with("[Expected: multiple of 2; Actual: 3]"));
    }

    #[test]
    fn test_indent_four() {
        let text = "- a\n    - b\n        - c\n- d\n";
        assert!(check_with(&UlIndent, text, &indent(4)).is_empty());

        let flagged: Vec<_> = check_with(&UlIndent, "- a\n  - b\n", &indent(4))
            .iter()
            .map(|v| v.line)
            .collect();
        assert_eq!(flagged, vec![2]);
    }

    #[test]
    fn test_top_level_measured_from_container() {
        assert_eq!(lines(&UlIndent, " - a\n - b\n"), vec![1, 2]);
        assert!(lines(&UlIndent, "> - a\n>   - b\n").is_empty());
    }

    #[test]
    fn test_ignores_fenced_code() {
        let text = "- a\n\n```\n   - not a list\n     - still code\n```\n";
        assert!(lines(&UlIndent, text).is_empty());
    }

    #[test]
    fn test_skips_items_under_ordered_lists() {
        assert!(lines(&UlIndent, "1. a\n   - b\n").is_empty());
    }

    #[test]
    fn test_tabs_are_expanded() {
        assert!(check_with(&UlIndent, "- a\n\t- b\n", &indent(4)).is_empty());
    }
}
