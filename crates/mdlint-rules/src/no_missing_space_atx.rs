//! Rule flagging `#Heading` lines that were meant to be headings.
//!
//! Without a space after the hashes the line is not a heading at all, so
//! this rule looks at paragraphs rather than headings.

use mdlint_core::{BlockKind, Document, Rule, RuleParams, Violation};

/// Rule code for no-missing-space-atx.
pub const CODE: &str = "MD018";

/// Rule name for no-missing-space-atx.
pub const NAME: &str = "no-missing-space-atx";

const DESCRIPTION: &str = "No space after hash on atx style header";

fn missing_space(line: &str) -> bool {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    (1..=6).contains(&hashes)
        && line[hashes..]
            .chars()
            .next()
            .is_some_and(|c| !c.is_whitespace())
}

/// Flags paragraphs starting with `#` immediately followed by text.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMissingSpaceAtx;

impl Rule for NoMissingSpaceAtx {
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
        &["headers", "atx", "spaces"]
    }

    fn check(&self, doc: &Document, _params: &RuleParams) -> Vec<Violation> {
        doc.blocks()
            .iter()
            .filter(|b| b.kind == BlockKind::Paragraph)
            .filter(|b| {
                let first = doc.slice(&b.range).lines().next().unwrap_or("");
                missing_space(first.trim_start())
            })
            .map(|b| self.violation(b.line, DESCRIPTION))
            .collect()
    }
}
