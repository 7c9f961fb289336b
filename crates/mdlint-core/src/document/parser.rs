//! Builds a [`Document`] from `pulldown-cmark` offset events.

use super::lines::{expand_width, leading_whitespace, LineIndex};
use super::{
    Block, BlockKind, Document, HeadingStyle, InlineKind, InlineSpan, Line, List, ParseOptions,
    ParseWarning,
};
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use std::ops::Range;

enum Frame {
    Item { block: usize, column: usize },
    Quote { content_column: usize },
}

struct ListFrame {
    ordered: bool,
    index: usize,
}

struct Builder<'a> {
    source: &'a str,
    index: &'a LineIndex,
    tab_width: usize,
    blocks: Vec<Block>,
    lists: Vec<List>,
    spans: Vec<InlineSpan>,
    warnings: Vec<ParseWarning>,
    containers: Vec<Frame>,
    list_stack: Vec<ListFrame>,
    code_lines: Vec<Range<usize>>,
    table_lines: Vec<Range<usize>>,
    heading: Option<usize>,
}

pub(super) fn parse(text: &str, options: &ParseOptions) -> Document {
    let index = LineIndex::new(text);
    let front_matter_end = if options.ignore_front_matter {
        front_matter_end_line(text)
    } else {
        None
    };

    // Front matter is blanked out (newlines kept) so offsets stay valid.
    let masked;
    let parse_source = if let Some(last) = front_matter_end {
        let cut = index.line_start(last + 1);
        masked = mask(text, cut);
        masked.as_str()
    } else {
        text
    };

    let mut builder = Builder {
        source: text,
        index: &index,
        tab_width: options.tab_width.max(1),
        blocks: Vec::new(),
        lists: Vec::new(),
        spans: Vec::new(),
        warnings: Vec::new(),
        containers: Vec::new(),
        list_stack: Vec::new(),
        code_lines: Vec::new(),
        table_lines: Vec::new(),
        heading: None,
    };

    if let Some(last) = front_matter_end {
        builder.blocks.push(Block {
            kind: BlockKind::FrontMatter,
            depth: 0,
            indent: 0,
            column: 0,
            range: 0..index.line_start(last + 1),
            line: 1,
            end_line: last,
            parent: None,
        });
    }

    let cmark_options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    for (event, range) in Parser::new_ext(parse_source, cmark_options).into_offset_iter() {
        builder.event(event, range);
    }

    builder.clip_containers();
    let lines = builder.build_lines(front_matter_end.unwrap_or(0));
    let Builder {
        blocks,
        lists,
        spans,
        warnings,
        ..
    } = builder;

    Document {
        source: text.to_string(),
        lines,
        blocks,
        lists,
        spans,
        warnings,
    }
}

/// Returns the last line of a leading `---` front matter block.
fn front_matter_end_line(text: &str) -> Option<usize> {
    let mut lines = text.lines();
    if lines.next().map(str::trim_end) != Some("---") {
        return None;
    }
    lines
        .position(|l| matches!(l.trim_end(), "---" | "..."))
        .map(|i| i + 2)
}

fn mask(text: &str, cut: usize) -> String {
    let (head, tail) = text.split_at(cut.min(text.len()));
    let mut out = String::with_capacity(text.len());
    for c in head.chars() {
        if c == '\n' {
            out.push('\n');
        } else {
            // One space per byte keeps offsets aligned.
            out.extend(std::iter::repeat(' ').take(c.len_utf8()));
        }
    }
    out.push_str(tail);
    out
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

impl Builder<'_> {
    fn event(&mut self, event: Event<'_>, range: Range<usize>) {
        match event {
            Event::Start(tag) => self.start(tag, range),
            Event::End(end) => self.end(end),
            Event::Text(text) => self.heading_text(&text),
            Event::Code(text) => {
                self.heading_text(&text);
                self.span(InlineKind::Code, range);
            }
            Event::InlineHtml(_) => self.span(InlineKind::Html, range),
            Event::Rule => {
                self.leaf(BlockKind::ThematicBreak, range);
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>, range: Range<usize>) {
        match tag {
            Tag::List(start) => {
                let depth = self.containers.len();
                self.lists.push(List {
                    ordered: start.is_some(),
                    depth,
                    line: self.index.line_of(self.marker_start(range.start)),
                    end_line: self.end_line(&range),
                    items: Vec::new(),
                });
                self.list_stack.push(ListFrame {
                    ordered: start.is_some(),
                    index: self.lists.len() - 1,
                });
            }
            Tag::Item => self.item(range),
            Tag::BlockQuote(_) => self.quote(range),
            Tag::Heading { level, .. } => {
                let style = self.heading_style(range.start);
                let kind = BlockKind::Heading {
                    level: heading_level(level),
                    style,
                    text: String::new(),
                };
                self.heading = Some(self.leaf(kind, range));
            }
            Tag::Paragraph => {
                self.leaf(BlockKind::Paragraph, range);
            }
            Tag::CodeBlock(kind) => {
                let lines = self.line_range(&range);
                self.code_lines.push(lines);
                let kind = match kind {
                    CodeBlockKind::Fenced(info) => {
                        let fence = self
                            .source
                            .get(self.content_start(range.start)..)
                            .and_then(|s| s.chars().next())
                            .unwrap_or('`');
                        let info = info.trim();
                        self.check_fence_closed(&range, fence);
                        BlockKind::CodeFence {
                            info: (!info.is_empty()).then(|| info.to_string()),
                            fence,
                        }
                    }
                    CodeBlockKind::Indented => BlockKind::IndentedCode,
                };
                self.leaf(kind, range);
            }
            Tag::HtmlBlock => {
                self.leaf(BlockKind::HtmlBlock, range);
            }
            Tag::Table(_) => {
                let lines = self.line_range(&range);
                self.table_lines.push(lines);
                self.leaf(BlockKind::Table, range);
            }
            Tag::Emphasis => self.span(InlineKind::Emphasis, range),
            Tag::Strong => self.span(InlineKind::Strong, range),
            Tag::Link { .. } => self.span(InlineKind::Link, range),
            _ => {}
        }
    }

    fn end(&mut self, end: TagEnd) {
        match end {
            TagEnd::Item | TagEnd::BlockQuote(_) => {
                self.containers.pop();
            }
            TagEnd::List(_) => {
                self.list_stack.pop();
            }
            TagEnd::Heading(_) => self.heading = None,
            _ => {}
        }
    }

    fn heading_text(&mut self, text: &str) {
        if let Some(i) = self.heading {
            if let Some(BlockKind::Heading { text: buf, .. }) =
                self.blocks.get_mut(i).map(|b| &mut b.kind)
            {
                buf.push_str(text);
            }
        }
    }

    /// Offset of the first non-whitespace character at or after `offset` on its line.
    fn content_start(&self, offset: usize) -> usize {
        self.skip_on_line(offset, &[' ', '\t'])
    }

    /// Offset of the list marker at or after `offset`.
    ///
    /// Item and list ranges may begin at the end of the previous line when
    /// the indentation contains tabs, so line breaks are skipped too.
    fn marker_start(&self, offset: usize) -> usize {
        let rest = self.source.get(offset..).unwrap_or("");
        let n = rest
            .char_indices()
            .find(|&(_, c)| !matches!(c, ' ' | '\t' | '\r' | '\n' | '>'))
            .map_or(rest.len(), |(i, _)| i);
        offset + n
    }

    fn skip_on_line(&self, offset: usize, skip: &[char]) -> usize {
        let rest = self.source.get(offset..).unwrap_or("");
        let n = rest
            .char_indices()
            .find(|&(_, c)| c == '\n' || !skip.contains(&c))
            .map_or(rest.len(), |(i, _)| i);
        offset + n
    }

    /// Tab-expanded column of `offset` within its line.
    fn column_of(&self, offset: usize) -> usize {
        let line_start = self.index.line_start(self.index.line_of(offset));
        let prefix = self.source.get(line_start..offset).unwrap_or("");
        expand_width(prefix, self.tab_width)
    }

    fn base_column(&self) -> usize {
        match self.containers.last() {
            Some(Frame::Item { column, .. }) => *column,
            Some(Frame::Quote { content_column }) => *content_column,
            None => 0,
        }
    }

    fn parent_item(&self) -> Option<usize> {
        self.containers.iter().rev().find_map(|f| match f {
            Frame::Item { block, .. } => Some(*block),
            Frame::Quote { .. } => None,
        })
    }

    fn end_line(&self, range: &Range<usize>) -> usize {
        let start = self.index.line_of(range.start);
        self.index
            .line_of(range.end.saturating_sub(1))
            .max(start)
    }

    fn line_range(&self, range: &Range<usize>) -> Range<usize> {
        self.index.line_of(range.start)..self.end_line(range) + 1
    }

    fn push_block(&mut self, kind: BlockKind, start: usize, range: Range<usize>) -> usize {
        let column = self.column_of(start);
        let block = Block {
            kind,
            depth: self.containers.len(),
            indent: column.saturating_sub(self.base_column()),
            column,
            line: self.index.line_of(start),
            end_line: self.end_line(&range),
            range,
            parent: self.parent_item(),
        };
        self.blocks.push(block);
        self.blocks.len() - 1
    }

    fn leaf(&mut self, kind: BlockKind, range: Range<usize>) -> usize {
        let start = self.content_start(range.start);
        self.push_block(kind, start, range)
    }

    fn item(&mut self, range: Range<usize>) {
        let marker_at = self.marker_start(range.start);
        let rest = self.source.get(marker_at..).unwrap_or("");
        let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
        let number = digits.parse::<u64>().ok();
        let marker = rest[digits.len()..].chars().next().unwrap_or('-');
        let (ordered, list) = self
            .list_stack
            .last()
            .map_or((number.is_some(), 0), |l| (l.ordered, l.index));

        let line_start = self.index.line_start(self.index.line_of(marker_at));
        if self
            .source
            .get(line_start..marker_at)
            .is_some_and(|p| p.contains('\t'))
        {
            self.warnings.push(ParseWarning {
                line: self.index.line_of(marker_at),
                message: format!(
                    "list item indentation contains tabs; expanded with tab width {}",
                    self.tab_width
                ),
            });
        }

        let kind = BlockKind::ListItem {
            ordered,
            marker,
            number: if ordered { number } else { None },
            list,
        };
        let block = self.push_block(kind, marker_at, range);
        if let Some(l) = self.lists.get_mut(list) {
            l.items.push(block);
        }
        let column = self.blocks[block].column;
        self.containers.push(Frame::Item { block, column });
    }

    fn quote(&mut self, range: Range<usize>) {
        let at = self.content_start(range.start);
        let block = self.push_block(BlockKind::BlockQuote, at, range);
        let column = self.blocks[block].column;
        let bytes = self.source.as_bytes();
        let content_column = match (bytes.get(at), bytes.get(at + 1)) {
            (Some(b'>'), Some(b' ')) => column + 2,
            (Some(b'>'), _) => column + 1,
            _ => column,
        };
        self.containers.push(Frame::Quote { content_column });
    }

    fn span(&mut self, kind: InlineKind, range: Range<usize>) {
        let line = self.index.line_of(range.start);
        let column = range.start - self.index.line_start(line) + 1;
        self.spans.push(InlineSpan {
            kind,
            range,
            line,
            column,
        });
    }

    fn heading_style(&self, start: usize) -> HeadingStyle {
        let at = self.content_start(start);
        let line_end = self
            .source
            .get(at..)
            .and_then(|s| s.find('\n'))
            .map_or(self.source.len(), |i| at + i);
        let text = self.source.get(at..line_end).unwrap_or("").trim_end();
        if !text.starts_with('#') {
            return HeadingStyle::Setext;
        }
        let opening = text.chars().take_while(|&c| c == '#').count();
        let body = &text[opening..];
        let stripped = body.trim_end_matches('#');
        if stripped.len() < body.len() && (stripped.is_empty() || stripped.ends_with([' ', '\t'])) {
            HeadingStyle::AtxClosed
        } else {
            HeadingStyle::Atx
        }
    }

    fn check_fence_closed(&mut self, range: &Range<usize>, fence: char) {
        let first = self.index.line_of(range.start);
        let last = self.end_line(range);
        let opening_at = self.content_start(range.start);
        let opening = self
            .source
            .get(opening_at..)
            .unwrap_or("")
            .chars()
            .take_while(|&c| c == fence)
            .count();
        let closing_start = self.index.line_start(last);
        let closing_end = self.index.line_start(last + 1);
        let closing = self
            .source
            .get(closing_start..closing_end)
            .unwrap_or("")
            .trim();
        let closed = last > first
            && closing.chars().all(|c| c == fence)
            && closing.chars().count() >= opening;
        if !closed {
            self.warnings.push(ParseWarning {
                line: first,
                message: "code fence is never closed; it runs to the end of the document"
                    .to_string(),
            });
        }
    }

    fn clip_containers(&mut self) {
        for i in 1..self.blocks.len() {
            let next_start = self.blocks[i].range.start;
            let prev = &mut self.blocks[i - 1].range;
            if next_start < prev.end {
                prev.end = next_start.max(prev.start);
            }
        }
    }

    fn build_lines(&self, front_matter_end: usize) -> Vec<Line> {
        let in_any = |ranges: &[Range<usize>], n: usize| ranges.iter().any(|r| r.contains(&n));
        (1..=self.index.line_count())
            .map(|number| {
                let start = self.index.line_start(number);
                let end = self.index.line_start(number + 1);
                let text = self
                    .source
                    .get(start..end)
                    .unwrap_or("")
                    .trim_end_matches('\n')
                    .trim_end_matches('\r')
                    .to_string();
                Line {
                    number,
                    indent: expand_width(leading_whitespace(&text), self.tab_width),
                    blank: text.trim().is_empty(),
                    in_code: in_any(&self.code_lines, number),
                    in_front_matter: number <= front_matter_end,
                    in_table: in_any(&self.table_lines, number),
                    text,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::document::{BlockKind, Document, HeadingStyle, InlineKind, ParseOptions};

    fn kinds(doc: &Document) -> Vec<&BlockKind> {
        doc.blocks().iter().map(|b| &b.kind).collect()
    }

    #[test]
    fn headings_record_level_style_and_line() {
        let doc = Document::parse("# One\n\nTwo\n===\n\n## Three ##\n");
        let headings: Vec<_> = doc
            .headings()
            .map(|(b, level, style, text)| (b.line, level, style, text.to_string()))
            .collect();
        assert_eq!(
            headings,
            vec![
                (1, 1, HeadingStyle::Atx, "One".to_string()),
                (3, 1, HeadingStyle::Setext, "Two".to_string()),
                (6, 2, HeadingStyle::AtxClosed, "Three".to_string()),
            ]
        );
    }

    #[test]
    fn hash_inside_heading_text_is_not_closed_style() {
        let doc = Document::parse("# Learn C#\n");
        let (_, _, style, _) = doc.headings().next().unwrap();
        assert_eq!(style, HeadingStyle::Atx);
    }

    #[test]
    fn nested_list_items_have_relative_indent() {
        let doc = Document::parse("- a\n    - b\n        - c\n- d\n");
        let items: Vec<_> = doc.list_items().map(|b| (b.line, b.indent, b.depth)).collect();
        assert_eq!(items, vec![(1, 0, 0), (2, 4, 1), (3, 4, 2), (4, 0, 0)]);
    }

    #[test]
    fn tabs_are_expanded_before_indent() {
        let opts = ParseOptions {
            tab_width: 4,
            ..ParseOptions::default()
        };
        let doc = Document::parse_with("- a\n\t- b\n", &opts);
        let nested = doc.list_items().nth(1).unwrap();
        assert_eq!(nested.column, 4);
        assert_eq!(nested.indent, 4);
        assert_eq!(doc.warnings().len(), 1);
    }

    #[test]
    fn tab_indented_items_land_on_their_own_line() {
        let doc = Document::parse("- a\n\t- b\n");
        let items: Vec<_> = doc
            .list_items()
            .map(|b| (b.line, b.column, b.indent))
            .collect();
        assert_eq!(items, vec![(1, 0, 0), (2, 4, 4)]);
        assert_eq!(doc.lists()[1].line, 2);

        let doc = Document::parse("* a\n\n\t* b\n");
        let lines: Vec<_> = doc.list_items().map(|b| b.line).collect();
        assert_eq!(lines, vec![1, 3]);
    }

    #[test]
    fn list_items_inside_code_fence_are_not_blocks() {
        let doc = Document::parse("```\n   - not a list\n```\n");
        assert_eq!(doc.list_items().count(), 0);
        assert!(doc.lines().iter().all(|l| l.in_code));
    }

    #[test]
    fn blocks_are_ordered_and_disjoint() {
        let doc = Document::parse("> - a\n>   more\n\n- b\n\n  para\n\n```rust\nx\n```\n");
        let blocks = doc.blocks();
        for pair in blocks.windows(2) {
            assert!(pair[0].range.end <= pair[1].range.start);
            assert!(pair[0].range.start <= pair[1].range.start);
        }
    }

    #[test]
    fn block_quote_items_measure_from_quote_content() {
        let doc = Document::parse("> - a\n>   - b\n");
        let items: Vec<_> = doc.list_items().map(|b| b.indent).collect();
        assert_eq!(items, vec![0, 2]);
    }

    #[test]
    fn ordered_items_record_number_and_delimiter() {
        let doc = Document::parse("1. a\n2) b\n");
        let first = doc.list_items().next().unwrap();
        assert!(matches!(
            first.kind,
            BlockKind::ListItem {
                ordered: true,
                marker: '.',
                number: Some(1),
                ..
            }
        ));
    }

    #[test]
    fn unclosed_fence_is_a_warning_not_an_error() {
        let doc = Document::parse("text\n\n```\ncode\n");
        assert_eq!(doc.warnings().len(), 1);
        assert_eq!(doc.warnings()[0].line, 3);
        assert!(doc.code_blocks().next().is_some());
    }

    #[test]
    fn closed_fence_has_no_warning() {
        let doc = Document::parse("~~~~\ncode\n~~~~\n");
        assert!(doc.warnings().is_empty());
        assert!(matches!(
            kinds(&doc)[0],
            BlockKind::CodeFence { fence: '~', info: None }
        ));
    }

    #[test]
    fn inline_spans_have_positions() {
        let doc = Document::parse("a *b* `c` <br> [d](e)\n");
        let spans: Vec<_> = doc.spans().iter().map(|s| (s.kind, s.column)).collect();
        assert_eq!(
            spans,
            vec![
                (InlineKind::Emphasis, 3),
                (InlineKind::Code, 7),
                (InlineKind::Html, 11),
                (InlineKind::Link, 16),
            ]
        );
    }

    #[test]
    fn front_matter_is_hidden_when_requested() {
        let text = "---\ntitle: x\n- y\n---\n# Heading\n";
        let opts = ParseOptions {
            ignore_front_matter: true,
            ..ParseOptions::default()
        };
        let doc = Document::parse_with(text, &opts);
        assert!(matches!(kinds(&doc)[0], BlockKind::FrontMatter));
        assert_eq!(doc.list_items().count(), 0);
        assert_eq!(doc.headings().next().map(|(b, ..)| b.line), Some(5));
        assert!(doc.line(3).unwrap().in_front_matter);
        assert!(!doc.line(5).unwrap().in_front_matter);
    }

    #[test]
    fn empty_input_is_an_empty_document() {
        let doc = Document::parse("");
        assert!(doc.blocks().is_empty());
        assert!(doc.lines().is_empty());
    }
}
