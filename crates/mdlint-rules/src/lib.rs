//! # mdlint-rules
//!
//! Built-in Markdown lint rules for mdlint.
//!
//! Rule ids and aliases follow the `mdl` catalog, so existing style files
//! keep working.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | MD001 | `header-increment` | Header levels should only increment by one level at a time |
//! | MD003 | `header-style` | Header style |
//! | MD004 | `ul-style` | Unordered list style |
//! | MD005 | `list-indent` | Inconsistent indentation for list items at the same level |
//! | MD007 | `ul-indent` | Unordered list indentation |
//! | MD009 | `no-trailing-spaces` | Trailing spaces |
//! | MD010 | `no-hard-tabs` | Hard tabs |
//! | MD012 | `no-multiple-blanks` | Multiple consecutive blank lines |
//! | MD013 | `line-length` | Line length |
//! | MD014 | `commands-show-output` | Dollar signs used before commands without showing output |
//! | MD018 | `no-missing-space-atx` | No space after hash on atx style header |
//! | MD022 | `blanks-around-headers` | Headers should be surrounded by blank lines |
//! | MD025 | `single-h1` | Multiple top level headers in the same document |
//! | MD026 | `no-trailing-punctuation` | Trailing punctuation in header |
//! | MD029 | `ol-prefix` | Ordered list item prefix |
//! | MD031 | `blanks-around-fences` | Fenced code blocks should be surrounded by blank lines |
//! | MD032 | `blanks-around-lists` | Lists should be surrounded by blank lines |
//! | MD033 | `no-inline-html` | Inline HTML |
//! | MD036 | `no-emphasis-as-header` | Emphasis used instead of a header |
//! | MD040 | `fenced-code-language` | Fenced code blocks should have a language specified |
//! | MD047 | `single-trailing-newline` | File should end with a single newline character |
//!
//! ## Usage
//!
//! ```ignore
//! use mdlint_core::{Engine, Resolver};
//!
//! let registry = mdlint_rules::registry();
//! let policy = Resolver::new(registry).resolve_file(".mdlstyle.rb".as_ref())?;
//! let engine = Engine::builder(registry).policy(policy).build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod blanks_around_fences;
mod blanks_around_headers;
mod blanks_around_lists;
mod catalog;
mod commands_show_output;
mod fenced_code_language;
mod header_increment;
mod header_style;
mod line_length;
mod list_indent;
mod no_emphasis_as_header;
mod no_hard_tabs;
mod no_inline_html;
mod no_missing_space_atx;
mod no_multiple_blanks;
mod no_trailing_punctuation;
mod no_trailing_spaces;
mod ol_prefix;
mod single_h1;
mod single_trailing_newline;
mod ul_indent;
mod ul_style;
mod util;

pub use blanks_around_fences::BlanksAroundFences;
pub use blanks_around_headers::BlanksAroundHeaders;
pub use blanks_around_lists::BlanksAroundLists;
pub use catalog::{all_rules, registry};
pub use commands_show_output::CommandsShowOutput;
pub use fenced_code_language::FencedCodeLanguage;
pub use header_increment::HeaderIncrement;
pub use header_style::HeaderStyle;
pub use line_length::LineLength;
pub use list_indent::ListIndent;
pub use no_emphasis_as_header::NoEmphasisAsHeader;
pub use no_hard_tabs::NoHardTabs;
pub use no_inline_html::NoInlineHtml;
pub use no_missing_space_atx::NoMissingSpaceAtx;
pub use no_multiple_blanks::NoMultipleBlanks;
pub use no_trailing_punctuation::NoTrailingPunctuation;
pub use no_trailing_spaces::NoTrailingSpaces;
pub use ol_prefix::OlPrefix;
pub use single_h1::SingleH1;
pub use single_trailing_newline::SingleTrailingNewline;
pub use ul_indent::UlIndent;
pub use ul_style::UlStyle;

/// Re-export core types for convenience.
pub use mdlint_core::{Document, Rule, RuleParams, Violation};
