//! Rule forbidding raw HTML.
//!
//! # Configuration
//!
//! - `allowed_elements`: comma or space separated element names that may
//!   be used (default: none)
//!
//! Closing tags, comments and processing instructions are ignored; only
//! opening tags are reported.

use mdlint_core::document::InlineKind;
use mdlint_core::{BlockKind, Document, ParamSpec, Rule, RuleParams, Violation};

/// Rule code for no-inline-html.
pub const CODE: &str = "MD033";

/// Rule name for no-inline-html.
pub const NAME: &str = "no-inline-html";

const DESCRIPTION: &str = "Inline HTML";

const PARAMS: &[ParamSpec] = &[ParamSpec::string("allowed_elements", "")];

/// Element name of an opening tag at the start of `html`.
fn element_name(html: &str) -> Option<String> {
    let rest = html.trim_start().strip_prefix('<')?;
    let name: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();
    let starts_with_letter = name.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
    starts_with_letter.then(|| name.to_ascii_lowercase())
}

/// Flags HTML elements in inline spans and HTML blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInlineHtml;

impl Rule for NoInlineHtml {
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
        &["html"]
    }

    fn params(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn check(&self, doc: &Document, params: &RuleParams) -> Vec<Violation> {
        let allowed: Vec<String> = params
            .get_str("allowed_elements", "")
            .split([',', ' '])
            .filter(|s| !s.is_empty())
            .map(str::to_ascii_lowercase)
            .collect();

        let inline = doc
            .spans()
            .iter()
            .filter(|s| s.kind == InlineKind::Html)
            .map(|s| (s.line, s.column, doc.slice(&s.range)));
        let blocks = doc
            .blocks()
            .iter()
            .filter(|b| b.kind == BlockKind::HtmlBlock)
            .map(|b| (b.line, b.column + 1, doc.slice(&b.range)));

        let mut violations: Vec<Violation> = inline
            .chain(blocks)
            .filter_map(|(line, column, html)| {
                let element = element_name(html)?;
                (!allowed.contains(&element)).then(|| {
                    self.violation(line, format!("{DESCRIPTION} [Element: {element}]"))
                        .with_column(column)
                })
            })
            .collect();
        violations.sort_by_key(|v| (v.line, v.column));
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{check, check_with};
    use mdlint_core::ParamValue;

    #[test]
    fn test_detects_inline_and_block_html() {
        let violations = check(&NoInlineHtml, "Line<br>break\n\n<div>\nblock\n</div>\n");
        let found: Vec<_> = violations
            .iter()
            .map(|v| (v.line, v.column, v.message.as_str()))
            .collect();
        assert_eq!(
            found,
            vec![
                (1, Some(5), "Inline HTML [Element: br]"),
                (3, Some(1), "Inline HTML [Element: div]"),
            ]
        );
    }

    #[test]
    fn test_ignores_closing_tags_and_comments() {
        let violations = check(&NoInlineHtml, "<!-- note -->\n\ntext</b> more\n");
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn test_allowed_elements() {
        let allow = [("allowed_elements", ParamValue::String("br, DIV".into()))];
        let violations = check_with(&NoInlineHtml, "a<br>b <kbd>x</kbd>\n\n<div>\n</div>\n", &allow);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("kbd"));
    }

    #[test]
    fn test_element_name_parsing() {
        assert_eq!(element_name("<img src=x>"), Some("img".to_string()));
        assert_eq!(element_name("</p>"), None);
        assert_eq!(element_name("<!DOCTYPE html>"), None);
        assert_eq!(element_name("<?php ?>"), None);
    }
}
