//! Byte offset to line/column mapping and tab expansion.

/// Index of line start offsets for a source text.
///
/// Lookups are `O(log n)` in the number of lines.
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    /// Builds the index for `text`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(
            text.bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        // A trailing newline does not open a new line.
        if starts.len() > 1 && starts.last() == Some(&text.len()) {
            starts.pop();
        }
        Self {
            starts,
            len: text.len(),
        }
    }

    /// Returns the 1-based line containing `offset`.
    #[must_use]
    pub fn line_of(&self, offset: usize) -> usize {
        let offset = offset.min(self.len);
        match self.starts.binary_search(&offset) {
            Ok(i) => i + 1,
            Err(i) => i,
        }
    }

    /// Returns the byte offset at which the 1-based `line` starts.
    #[must_use]
    pub fn line_start(&self, line: usize) -> usize {
        line.checked_sub(1)
            .and_then(|i| self.starts.get(i))
            .copied()
            .unwrap_or(self.len)
    }

    /// Number of lines in the text.
    #[must_use]
    pub fn line_count(&self) -> usize {
        if self.len == 0 {
            0
        } else {
            self.starts.len()
        }
    }
}

/// Returns the display width of `prefix` with tabs expanded to `tab_width` stops.
#[must_use]
pub fn expand_width(prefix: &str, tab_width: usize) -> usize {
    let tab_width = tab_width.max(1);
    prefix.chars().fold(0, |col, c| {
        if c == '\t' {
            col + tab_width - (col % tab_width)
        } else {
            col + 1
        }
    })
}

/// Returns the leading whitespace of `line`.
#[must_use]
pub fn leading_whitespace(line: &str) -> &str {
    let end = line
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(line.len());
    &line[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_of_maps_offsets() {
        let idx = LineIndex::new("ab\ncd\n\nef");
        assert_eq!(idx.line_of(0), 1);
        assert_eq!(idx.line_of(2), 1);
        assert_eq!(idx.line_of(3), 2);
        assert_eq!(idx.line_of(6), 3);
        assert_eq!(idx.line_of(7), 4);
        assert_eq!(idx.line_count(), 4);
    }

    #[test]
    fn trailing_newline_is_not_a_line() {
        let idx = LineIndex::new("a\nb\n");
        assert_eq!(idx.line_count(), 2);
        assert_eq!(idx.line_of(4), 2);
    }

    #[test]
    fn line_start_round_trips() {
        let idx = LineIndex::new("one\ntwo\nthree");
        assert_eq!(idx.line_start(1), 0);
        assert_eq!(idx.line_start(3), 8);
        assert_eq!(idx.line_of(idx.line_start(2)), 2);
    }

    #[test]
    fn tabs_expand_to_next_stop() {
        assert_eq!(expand_width("\t", 4), 4);
        assert_eq!(expand_width("  \t", 4), 4);
        assert_eq!(expand_width("\t  ", 4), 6);
        assert_eq!(expand_width("\t", 8), 8);
        assert_eq!(expand_width("   ", 4), 3);
    }

    #[test]
    fn leading_whitespace_stops_at_content() {
        assert_eq!(leading_whitespace("  \t- x"), "  \t");
        assert_eq!(leading_whitespace("x"), "");
        assert_eq!(leading_whitespace("   "), "   ");
    }
}
