//! Rule requiring blank lines around headings.
//!
//! Only top-level headings are checked; a heading opening a list item or
//! block quote cannot be preceded by a blank line.

use crate::util::{separated_after, separated_before};
use mdlint_core::{Document, HeadingStyle, Rule, RuleParams, Violation};

/// Rule code for blanks-around-headers.
pub const CODE: &str = "MD022";

/// Rule name for blanks-around-headers.
pub const NAME: &str = "blanks-around-headers";

const DESCRIPTION: &str = "Headers should be surrounded by blank lines";

fn is_setext_underline(text: &str) -> bool {
    let t = text.trim();
    !t.is_empty() && (t.chars().all(|c| c == '=') || t.chars().all(|c| c == '-'))
}

/// Flags headings not separated from surrounding content by blank lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlanksAroundHeaders;

impl Rule for BlanksAroundHeaders {
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
        &["headers", "blank_lines"]
    }

    fn check(&self, doc: &Document, _params: &RuleParams) -> Vec<Violation> {
        let mut violations = Vec::new();

        for (block, _, style, _) in doc.headings().filter(|(b, ..)| b.depth == 0) {
            let mut last = block.end_line;
            if style == HeadingStyle::Setext
                && last == block.line
                && doc.line(last + 1).is_some_and(|l| is_setext_underline(&l.text))
            {
                last += 1;
            }

            let detail = match (separated_before(doc, block.line), separated_after(doc, last)) {
                (true, true) => continue,
                (false, true) => "before",
                (true, false) => "after",
                (false, false) => "before and after",
            };
            violations.push(self.violation(
                block.line,
                format!("{DESCRIPTION} [Missing blank line {detail}]"),
            ));
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{check, lines};

    #[test]
    fn test_detects_missing_blank_lines() {
        let violations = check(&BlanksAroundHeaders, "# Title\nText\n\nMore\n## Next\n");
        let found: Vec<_> = violations.iter().map(|v| (v.line, v.message.as_str())).collect();
        assert_eq!(
            found,
            vec![
                (1, "Headers should be surrounded by blank lines [Missing blank line after]"),
                (5, "Headers should be surrounded by blank lines [Missing blank line before]"),
            ]
        );
    }

    #[test]
    fn test_allows_document_edges() {
        assert!(lines(&BlanksAroundHeaders, "# Title\n\nText\n\n## End\n").is_empty());
    }

    #[test]
    fn test_setext_underline_is_part_of_heading() {
        assert!(lines(&BlanksAroundHeaders, "Title\n=====\n\nText\n").is_empty());
        assert_eq!(lines(&BlanksAroundHeaders, "Title\n=====\nText\n"), vec![1]);
    }

    #[test]
    fn test_front_matter_counts_as_separator() {
        let options = mdlint_core::ParseOptions {
            ignore_front_matter: true,
            ..mdlint_core::ParseOptions::default()
        };
        let doc = Document::parse_with("---\ntitle: x\n---\n# Title\n\ntext\n", &options);
        assert!(BlanksAroundHeaders
            .check(&doc, &RuleParams::default())
            .is_empty());
    }
}
