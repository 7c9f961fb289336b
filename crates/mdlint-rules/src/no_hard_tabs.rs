//! Rule forbidding tab characters.
//!
//! # Configuration
//!
//! - `code_blocks`: also check lines inside code blocks (default: true)

use mdlint_core::{Document, ParamSpec, Rule, RuleParams, Violation};

/// Rule code for no-hard-tabs.
pub const CODE: &str = "MD010";

/// Rule name for no-hard-tabs.
pub const NAME: &str = "no-hard-tabs";

const DESCRIPTION: &str = "Hard tabs";

const PARAMS: &[ParamSpec] = &[ParamSpec::boolean("code_blocks", true)];

/// Flags lines containing tab characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHardTabs;

impl Rule for NoHardTabs {
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
        &["whitespace", "hard_tab"]
    }

    fn params(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn check(&self, doc: &Document, params: &RuleParams) -> Vec<Violation> {
        let code_blocks = params.get_bool("code_blocks", true);

        doc.lines()
            .iter()
            .filter(|l| !l.in_front_matter && (code_blocks || !l.in_code))
            .filter_map(|l| {
                let at = l.text.find('\t')?;
                Some(
                    self.violation(l.number, format!("{DESCRIPTION} [Column: {}]", at + 1))
                        .with_column(at + 1),
                )
            })
            .collect()
    }
}
