//! Rule for ordered list numbering.
//!
//! # Configuration
//!
//! - `style`: `one` (default) requires every item to be numbered `1`;
//!   `ordered` requires numbers to count up from the first item's number.

use mdlint_core::{BlockKind, Document, ParamSpec, Rule, RuleParams, Violation};

/// Rule code for ol-prefix.
pub const CODE: &str = "MD029";

/// Rule name for ol-prefix.
pub const NAME: &str = "ol-prefix";

const DESCRIPTION: &str = "Ordered list item prefix";

const STYLES: &[&str] = &["one", "ordered"];
const PARAMS: &[ParamSpec] = &[ParamSpec::enumeration("style", STYLES, "one")];

/// Flags ordered list items numbered against the configured style.
#[derive(Debug, Clone, Copy, Default)]
pub struct OlPrefix;

impl Rule for OlPrefix {
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
        &["ol"]
    }

    fn params(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn check(&self, doc: &Document, params: &RuleParams) -> Vec<Violation> {
        let ordered_style = params.get_str("style", "one") == "ordered";
        let blocks = doc.blocks();
        let mut violations = Vec::new();

        for list in doc.lists().iter().filter(|l| l.ordered) {
            let numbered = list.items.iter().filter_map(|&i| {
                let block = blocks.get(i)?;
                match block.kind {
                    BlockKind::ListItem {
                        number: Some(n), ..
                    } => Some((block, n)),
                    _ => None,
                }
            });

            let mut start = None;
            for (offset, (block, actual)) in (0u64..).zip(numbered) {
                let expected = if ordered_style {
                    *start.get_or_insert(actual) + offset
                } else {
                    1
                };
                if actual != expected {
                    violations.push(
                        self.violation(
                            block.line,
                            format!("{DESCRIPTION} [Expected: {expected}; Actual: {actual}]"),
                        )
                        .with_column(block.column + 1),
                    );
                }
            }
        }

        violations
    }
}
