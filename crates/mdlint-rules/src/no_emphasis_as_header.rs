//! Rule flagging emphasized paragraphs used as headings.
//!
//! # Configuration
//!
//! - `punctuation`: a paragraph ending in one of these characters reads as
//!   a sentence and is not flagged (default: `.,;:!?`)

use mdlint_core::document::InlineKind;
use mdlint_core::{BlockKind, Document, ParamSpec, Rule, RuleParams, Violation};

/// Rule code for no-emphasis-as-header.
pub const CODE: &str = "MD036";

/// Rule name for no-emphasis-as-header.
pub const NAME: &str = "no-emphasis-as-header";

const DESCRIPTION: &str = "Emphasis used instead of a header";

const PARAMS: &[ParamSpec] = &[ParamSpec::string("punctuation", ".,;:!?")];

/// Flags single-line paragraphs consisting only of emphasized text.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEmphasisAsHeader;

impl Rule for NoEmphasisAsHeader {
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
        &["headers", "emphasis"]
    }

    fn params(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn check(&self, doc: &Document, params: &RuleParams) -> Vec<Violation> {
        let punctuation = params.get_str("punctuation", ".,;:!?");

        doc.blocks()
            .iter()
            .filter(|b| b.kind == BlockKind::Paragraph)
            .filter(|b| {
                let raw = doc.slice(&b.range);
                let text = raw.trim();
                if text.is_empty() || text.contains('\n') {
                    return false;
                }
                let start = b.range.start + (raw.len() - raw.trim_start().len());
                let end = start + text.len();
                let whole = doc.spans().iter().any(|s| {
                    matches!(s.kind, InlineKind::Emphasis | InlineKind::Strong)
                        && s.range.start == start
                        && s.range.end == end
                });
                let inner = text.trim_matches(['*', '_']).trim();
                whole
                    && !inner.is_empty()
                    && !inner.ends_with(|c: char| punctuation.contains(c))
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
    fn test_detects_emphasis_paragraph() {
        assert_eq!(lines(&NoEmphasisAsHeader, "**Section**\n\nBody text.\n"), vec![1]);
        assert_eq!(lines(&NoEmphasisAsHeader, "Intro\n\n_Section_\n"), vec![3]);
    }

    #[test]
    fn test_allows_sentences_and_mixed_text() {
        let text = "**This is a note.**\n\nSome **bold** words\n\n**Multi\nline**\n";
        assert!(lines(&NoEmphasisAsHeader, text).is_empty());
    }
}
