//! Rule enforcing one heading style.
//!
//! # Configuration
//!
//! - `style`: `consistent` (default, the first heading decides), `atx`,
//!   `atx_closed` or `setext`
//!
//! Setext headings only exist for levels 1 and 2, so under the setext
//! style deeper headings may use either ATX form.

use mdlint_core::{Document, HeadingStyle as Style, ParamSpec, Rule, RuleParams, Violation};

/// Rule code for header-style.
pub const CODE: &str = "MD003";

/// Rule name for header-style.
pub const NAME: &str = "header-style";

const DESCRIPTION: &str = "Header style";

const STYLES: &[&str] = &["consistent", "atx", "atx_closed", "setext"];
const PARAMS: &[ParamSpec] = &[ParamSpec::enumeration("style", STYLES, "consistent")];

/// Flags headings whose markup style differs from the configured one.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderStyle;

impl Rule for HeaderStyle {
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
        let mut expected = match params.get_str("style", "consistent") {
            "atx" => Some(Style::Atx),
            "atx_closed" => Some(Style::AtxClosed),
            "setext" => Some(Style::Setext),
            _ => None,
        };

        doc.headings()
            .filter_map(|(block, level, actual, _)| {
                let want = *expected.get_or_insert(actual);
                let ok = actual == want || (want == Style::Setext && level > 2);
                (!ok).then(|| {
                    self.violation(
                        block.line,
                        format!(
                            "{DESCRIPTION} [Expected: {}; Actual: {}]",
                            want.as_str(),
                            actual.as_str()
                        ),
                    )
                })
            })
            .collect()
    }
}
