//! Helpers shared by the built-in rules.

use mdlint_core::{Block, BlockKind, Document, Line};

/// Strips block quote markers and indentation from the start of a line.
pub(crate) fn strip_container_prefix(text: &str) -> &str {
    text.trim_start_matches(|c: char| c == '>' || c == ' ' || c == '\t')
}

/// A blank line, or one holding nothing but block quote markers.
pub(crate) fn is_blank_like(line: &Line) -> bool {
    line.blank || strip_container_prefix(&line.text).is_empty()
}

/// Whether the line before `line` separates it from preceding content.
///
/// The first line of the document and the line after front matter count
/// as separated.
pub(crate) fn separated_before(doc: &Document, line: usize) -> bool {
    match doc.line(line.saturating_sub(1)) {
        Some(prev) if line > 1 => is_blank_like(prev) || prev.in_front_matter,
        _ => true,
    }
}

/// Whether the line after `line` separates it from following content.
pub(crate) fn separated_after(doc: &Document, line: usize) -> bool {
    doc.line(line + 1).map_or(true, is_blank_like)
}

fn is_closing_fence(text: &str, fence: char) -> bool {
    let rest = strip_container_prefix(text).trim_end();
    rest.len() >= 3 && rest.chars().all(|c| c == fence)
}

/// Content lines of a code block, without fence lines.
pub(crate) fn code_content<'d>(doc: &'d Document, block: &Block) -> Vec<&'d Line> {
    match &block.kind {
        BlockKind::CodeFence { fence, .. } => {
            let mut lines: Vec<&Line> = doc.line_texts(block.line + 1, block.end_line).collect();
            if lines
                .last()
                .is_some_and(|l| l.number > block.line && is_closing_fence(&l.text, *fence))
            {
                lines.pop();
            }
            lines
        }
        BlockKind::IndentedCode => doc.line_texts(block.line, block.end_line).collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separation_checks() {
        let doc = Document::parse("a\n\nb\n> \n> c\n");
        assert!(separated_before(&doc, 1));
        assert!(separated_before(&doc, 3));
        assert!(!separated_after(&doc, 4));
        assert!(separated_before(&doc, 5));
        assert!(separated_after(&doc, 5));
    }

    #[test]
    fn fenced_content_excludes_fences() {
        let doc = Document::parse("```sh\n$ ls\n$ pwd\n```\n");
        let block = doc.code_blocks().next().unwrap();
        let texts: Vec<_> = code_content(&doc, block).iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["$ ls", "$ pwd"]);
    }

    #[test]
    fn indented_content_is_every_line() {
        let doc = Document::parse("para\n\n    one\n    two\n");
        let block = doc.code_blocks().next().unwrap();
        assert_eq!(code_content(&doc, block).len(), 2);
    }
}
