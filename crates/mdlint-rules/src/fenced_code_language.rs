//! Rule requiring a language on fenced code blocks.

use mdlint_core::{BlockKind, Document, Rule, RuleParams, Violation};

/// Rule code for fenced-code-language.
pub const CODE: &str = "MD040";

/// Rule name for fenced-code-language.
pub const NAME: &str = "fenced-code-language";

const DESCRIPTION: &str = "Fenced code blocks should have a language specified";

/// Flags fenced code blocks without an info string.
#[derive(Debug, Clone, Copy, Default)]
pub struct FencedCodeLanguage;

impl Rule for FencedCodeLanguage {
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
        &["code", "language"]
    }

    fn check(&self, doc: &Document, _params: &RuleParams) -> Vec<Violation> {
        doc.code_blocks()
            .filter(|b| matches!(b.kind, BlockKind::CodeFence { info: None, .. }))
            .map(|b| self.violation(b.line, DESCRIPTION))
            .collect()
    }
}
