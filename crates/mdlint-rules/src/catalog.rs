//! The built-in rule catalog.

use crate::{
    BlanksAroundFences, BlanksAroundHeaders, BlanksAroundLists, CommandsShowOutput,
    FencedCodeLanguage, HeaderIncrement, HeaderStyle, LineLength, ListIndent, NoEmphasisAsHeader,
    NoHardTabs, NoInlineHtml, NoMissingSpaceAtx, NoMultipleBlanks, NoTrailingPunctuation,
    NoTrailingSpaces, OlPrefix, SingleH1, SingleTrailingNewline, UlIndent, UlStyle,
};
use mdlint_core::{Registry, RuleBox};
use std::sync::OnceLock;

/// Returns all available rules.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(HeaderIncrement),
        Box::new(HeaderStyle),
        Box::new(UlStyle),
        Box::new(ListIndent),
        Box::new(UlIndent),
        Box::new(NoTrailingSpaces),
        Box::new(NoHardTabs),
        Box::new(NoMultipleBlanks),
        Box::new(LineLength),
        Box::new(CommandsShowOutput),
        Box::new(NoMissingSpaceAtx),
        Box::new(BlanksAroundHeaders),
        Box::new(SingleH1),
        Box::new(NoTrailingPunctuation),
        Box::new(OlPrefix),
        Box::new(BlanksAroundFences),
        Box::new(BlanksAroundLists),
        Box::new(NoInlineHtml),
        Box::new(NoEmphasisAsHeader),
        Box::new(FencedCodeLanguage),
        Box::new(SingleTrailingNewline),
    ]
}

/// The process-wide registry of built-in rules.
///
/// Built on first use and never mutated afterwards.
#[must_use]
pub fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut registry = Registry::new();
        for rule in all_rules() {
            registry.register(rule);
        }
        tracing::debug!("Built rule registry with {} rules", registry.len());
        registry
    })
}
