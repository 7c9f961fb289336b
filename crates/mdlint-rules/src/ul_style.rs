//! Rule enforcing one unordered list marker.
//!
//! # Configuration
//!
//! - `style`: `consistent` (default), `asterisk`, `plus` or `dash`

use mdlint_core::{BlockKind, Document, ParamSpec, Rule, RuleParams, Violation};

/// Rule code for ul-style.
pub const CODE: &str = "MD004";

/// Rule name for ul-style.
pub const NAME: &str = "ul-style";

const DESCRIPTION: &str = "Unordered list style";

const STYLES: &[&str] = &["consistent", "asterisk", "plus", "dash"];
const PARAMS: &[ParamSpec] = &[ParamSpec::enumeration("style", STYLES, "consistent")];

fn marker_name(marker: char) -> &'static str {
    match marker {
        '*' => "asterisk",
        '+' => "plus",
        _ => "dash",
    }
}

/// Flags unordered list items using a different bullet character.
#[derive(Debug, Clone, Copy, Default)]
pub struct UlStyle;

impl Rule for UlStyle {
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
        &["bullet", "ul"]
    }

    fn params(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn check(&self, doc: &Document, params: &RuleParams) -> Vec<Violation> {
        let mut expected = match params.get_str("style", "consistent") {
            "asterisk" => Some('*'),
            "plus" => Some('+'),
            "dash" => Some('-'),
            _ => None,
        };

        let mut violations = Vec::new();
        for block in doc.list_items() {
            let BlockKind::ListItem {
                ordered: false,
                marker,
                ..
            } = block.kind
            else {
                continue;
            };
            let want = *expected.get_or_insert(marker);
            if marker != want {
                violations.push(
                    self.violation(
                        block.line,
                        format!(
                            "{DESCRIPTION} [Expected: {}; Actual: {}]",
                            marker_name(want),
                            marker_name(marker)
                        ),
                    )
                    .with_column(block.column + 1),
                );
            }
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
    fn test_consistent_uses_first_marker() {
        let violations = check(&UlStyle, "* a\n* b\n\n- c\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, 4);
        assert_eq!(violations[0].column, Some(1));
        assert!(violations[0].message.contains("Expected: asterisk; Actual: dash"));
    }

    #[test]
    fn test_ignores_ordered_items() {
        assert!(lines(&UlStyle, "1. a\n2. b\n\n- c\n- d\n").is_empty());
    }

    #[test]
    fn test_explicit_style_checks_nested_items() {
        let violations = check_with(
            &UlStyle,
            "- a\n  + b\n",
            &[("style", ParamValue::Enum("dash".into()))],
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, 2);
        assert_eq!(violations[0].column, Some(3));
    }
}
