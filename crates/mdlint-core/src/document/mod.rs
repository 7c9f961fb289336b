//! Structured representation of a Markdown document.
//!
//! A [`Document`] is built once per input by [`Document::parse`] and is
//! read-only afterwards. It exposes three views that rules combine:
//!
//! - [`Block`]s: leaf and container blocks in source order, with nesting
//!   depth and tab-expanded indentation.
//! - [`Line`]s: every physical line with code and front-matter flags.
//! - [`InlineSpan`]s: emphasis, code, HTML and link spans.

mod lines;
mod parser;

pub use lines::{expand_width, leading_whitespace, LineIndex};

use serde::Serialize;
use std::ops::Range;

/// Default tab stop width used when expanding indentation.
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Options controlling how text is turned into a [`Document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Tab stop width used to compute indentation.
    pub tab_width: usize,
    /// Recognize a leading YAML front matter block and hide it from rules.
    pub ignore_front_matter: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
            ignore_front_matter: false,
        }
    }
}

/// ATX (`# x`), closed ATX (`# x #`) or setext (underlined) headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingStyle {
    /// `# Heading`
    Atx,
    /// `# Heading #`
    AtxClosed,
    /// `Heading` followed by `===` or `---`.
    Setext,
}

impl HeadingStyle {
    /// Name used in configuration values and messages.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Atx => "atx",
            Self::AtxClosed => "atx_closed",
            Self::Setext => "setext",
        }
    }
}

/// Kind of a [`Block`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockKind {
    /// A heading.
    Heading {
        /// Heading level, 1 to 6.
        level: u8,
        /// Markup style of the heading.
        style: HeadingStyle,
        /// Plain text content.
        text: String,
    },
    /// A list item.
    ListItem {
        /// Whether the enclosing list is ordered.
        ordered: bool,
        /// Bullet character for unordered items, delimiter for ordered ones.
        marker: char,
        /// Item number for ordered items.
        number: Option<u64>,
        /// Index into [`Document::lists`] of the list this item belongs to.
        list: usize,
    },
    /// A fenced code block.
    CodeFence {
        /// Info string after the opening fence, if any.
        info: Option<String>,
        /// Fence character, `` ` `` or `~`.
        fence: char,
    },
    /// An indented code block.
    IndentedCode,
    /// A paragraph.
    Paragraph,
    /// A block quote container.
    BlockQuote,
    /// A raw HTML block.
    HtmlBlock,
    /// A thematic break (`---`, `***`).
    ThematicBreak,
    /// A table.
    Table,
    /// Leading YAML front matter.
    FrontMatter,
}

/// A block-level node.
///
/// Container ranges (list items, block quotes) are clipped at the start of
/// their first child, so block ranges never overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    /// What this block is.
    pub kind: BlockKind,
    /// Number of enclosing containers (list items and block quotes).
    pub depth: usize,
    /// Tab-expanded column relative to the enclosing container.
    ///
    /// For list items the enclosing container of a nested item is its
    /// parent item, measured from the parent's marker.
    pub indent: usize,
    /// Absolute tab-expanded column where the block starts.
    pub column: usize,
    /// Byte range in the source.
    pub range: Range<usize>,
    /// 1-based start line.
    pub line: usize,
    /// 1-based last line (inclusive) of the unclipped block.
    pub end_line: usize,
    /// Index of the enclosing list item, if any.
    pub parent: Option<usize>,
}

impl Block {
    /// Returns true for heading blocks.
    #[must_use]
    pub fn is_heading(&self) -> bool {
        matches!(self.kind, BlockKind::Heading { .. })
    }

    /// Returns true for list items.
    #[must_use]
    pub fn is_list_item(&self) -> bool {
        matches!(self.kind, BlockKind::ListItem { .. })
    }

    /// Returns true for fenced or indented code.
    #[must_use]
    pub fn is_code(&self) -> bool {
        matches!(self.kind, BlockKind::CodeFence { .. } | BlockKind::IndentedCode)
    }
}

/// A contiguous list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct List {
    /// Whether the list is ordered.
    pub ordered: bool,
    /// Number of enclosing containers.
    pub depth: usize,
    /// 1-based first line.
    pub line: usize,
    /// 1-based last line (inclusive).
    pub end_line: usize,
    /// Indices into [`Document::blocks`] of the list's own items.
    pub items: Vec<usize>,
}

/// A physical source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    /// 1-based line number.
    pub number: usize,
    /// Line text without the line terminator.
    pub text: String,
    /// Tab-expanded width of the leading whitespace.
    pub indent: usize,
    /// Whether the line is empty or whitespace only.
    pub blank: bool,
    /// Whether the line belongs to a code block (fences included).
    pub in_code: bool,
    /// Whether the line belongs to ignored front matter.
    pub in_front_matter: bool,
    /// Whether the line belongs to a table.
    pub in_table: bool,
}

/// Kind of an [`InlineSpan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InlineKind {
    /// `*x*` / `_x_`
    Emphasis,
    /// `**x**` / `__x__`
    Strong,
    /// `` `x` ``
    Code,
    /// Inline raw HTML such as `<br>`.
    Html,
    /// `[x](y)`
    Link,
}

/// An inline span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineSpan {
    /// What this span is.
    pub kind: InlineKind,
    /// Byte range in the source.
    pub range: Range<usize>,
    /// 1-based line of the span start.
    pub line: usize,
    /// 1-based byte column of the span start.
    pub column: usize,
}

/// A recoverable structural ambiguity found while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseWarning {
    /// 1-based line the warning refers to.
    pub line: usize,
    /// Human-readable description.
    pub message: String,
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// A parsed Markdown document.
#[derive(Debug, Clone)]
pub struct Document {
    source: String,
    lines: Vec<Line>,
    blocks: Vec<Block>,
    lists: Vec<List>,
    spans: Vec<InlineSpan>,
    warnings: Vec<ParseWarning>,
}

impl Document {
    /// Parses `text` with default options.
    ///
    /// Parsing never fails: malformed markup yields a best-effort structure
    /// plus [`ParseWarning`]s.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self::parse_with(text, &ParseOptions::default())
    }

    /// Parses `text` with explicit options.
    #[must_use]
    pub fn parse_with(text: &str, options: &ParseOptions) -> Self {
        parser::parse(text, options)
    }

    /// Full source text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// All physical lines.
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Returns the 1-based `number` line.
    #[must_use]
    pub fn line(&self, number: usize) -> Option<&Line> {
        number.checked_sub(1).and_then(|i| self.lines.get(i))
    }

    /// Blocks in source order.
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Lists in source order of their start.
    #[must_use]
    pub fn lists(&self) -> &[List] {
        &self.lists
    }

    /// Inline spans in source order.
    #[must_use]
    pub fn spans(&self) -> &[InlineSpan] {
        &self.spans
    }

    /// Parse warnings.
    #[must_use]
    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// Iterates over headings as `(block, level, style, text)`.
    pub fn headings(&self) -> impl Iterator<Item = (&Block, u8, HeadingStyle, &str)> {
        self.blocks.iter().filter_map(|b| match &b.kind {
            BlockKind::Heading { level, style, text } => Some((b, *level, *style, text.as_str())),
            _ => None,
        })
    }

    /// Iterates over list items.
    pub fn list_items(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| b.is_list_item())
    }

    /// Iterates over fenced and indented code blocks.
    pub fn code_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| b.is_code())
    }

    /// Returns the source text covered by `range`, clamped to the source.
    #[must_use]
    pub fn slice(&self, range: &Range<usize>) -> &str {
        let end = range.end.min(self.source.len());
        let start = range.start.min(end);
        self.source.get(start..end).unwrap_or("")
    }

    /// Returns the text of lines `first..=last`.
    pub fn line_texts(&self, first: usize, last: usize) -> impl Iterator<Item = &Line> {
        let start = first.saturating_sub(1).min(self.lines.len());
        let end = last.min(self.lines.len()).max(start);
        self.lines[start..end].iter()
    }

    /// Returns true when `line` exists and is blank.
    #[must_use]
    pub fn is_blank(&self, line: usize) -> bool {
        self.line(line).is_some_and(|l| l.blank)
    }

    /// Walks up the parent chain of list item `index`.
    pub fn ancestors(&self, index: usize) -> impl Iterator<Item = &Block> {
        let mut next = self.blocks.get(index).and_then(|b| b.parent);
        std::iter::from_fn(move || {
            let i = next?;
            let block = self.blocks.get(i)?;
            next = block.parent;
            Some(block)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ancestors_follow_parent_items() {
        let doc = Document::parse("- a\n  - b\n    - c\n");
        let items: Vec<usize> = doc
            .blocks()
            .iter()
            .enumerate()
            .filter(|(_, b)| b.is_list_item())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(items.len(), 3);
        assert_eq!(doc.ancestors(items[2]).count(), 2);
        assert_eq!(doc.ancestors(items[0]).count(), 0);
    }

    #[test]
    fn line_texts_clamps_bounds() {
        let doc = Document::parse("a\nb\nc\n");
        assert_eq!(doc.line_texts(2, 10).count(), 2);
        assert_eq!(doc.line_texts(0, 1).count(), 1);
        assert_eq!(doc.line_texts(5, 9).count(), 0);
    }
}
