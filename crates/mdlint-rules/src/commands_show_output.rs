//! Rule flagging shell examples that are nothing but `$` prompts.
//!
//! # Rationale
//!
//! A `$` prompt is only useful when it separates commands from their
//! output. When every line is a command the prompt just gets in the way of
//! copy and paste.

use crate::util::{code_content, strip_container_prefix};
use mdlint_core::{Document, Rule, RuleParams, Violation};

/// Rule code for commands-show-output.
pub const CODE: &str = "MD014";

/// Rule name for commands-show-output.
pub const NAME: &str = "commands-show-output";

const DESCRIPTION: &str = "Dollar signs used before commands without showing output";

fn is_prompt(text: &str) -> bool {
    strip_container_prefix(text)
        .strip_prefix('$')
        .is_some_and(|rest| rest.starts_with(char::is_whitespace))
}

/// Flags code blocks in which every non-blank line starts with `$`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandsShowOutput;

impl Rule for CommandsShowOutput {
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
        &["code"]
    }

    fn check(&self, doc: &Document, _params: &RuleParams) -> Vec<Violation> {
        doc.code_blocks()
            .filter(|block| {
                let content: Vec<_> = code_content(doc, block)
                    .into_iter()
                    .filter(|l| !l.blank)
                    .collect();
                !content.is_empty() && content.iter().all(|l| is_prompt(&l.text))
            })
            .map(|block| self.violation(block.line, DESCRIPTION))
            .collect()
    }
}
