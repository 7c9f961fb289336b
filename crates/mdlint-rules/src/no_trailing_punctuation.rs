//! Rule forbidding punctuation at the end of headings.
//!
//! # Configuration
//!
//! - `punctuation`: characters not allowed at the end (default: `.,;:!?`)

use mdlint_core::{Document, ParamSpec, Rule, RuleParams, Violation};

/// Rule code for no-trailing-punctuation.
pub const CODE: &str = "MD026";

/// Rule name for no-trailing-punctuation.
pub const NAME: &str = "no-trailing-punctuation";

const DESCRIPTION: &str = "Trailing punctuation in header";

const PARAMS: &[ParamSpec] = &[ParamSpec::string("punctuation", ".,;:!?")];

/// Flags headings ending in a configured punctuation character.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrailingPunctuation;

impl Rule for NoTrailingPunctuation {
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
        let punctuation = params.get_str("punctuation", ".,;:!?");

        doc.headings()
            .filter_map(|(block, _, _, text)| {
                let last = text.trim_end().chars().last()?;
                punctuation.contains(last).then(|| {
                    self.violation(block.line, format!("{DESCRIPTION} [Punctuation: '{last}']"))
                })
            })
            .collect()
    }
}
