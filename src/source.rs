//! Source text and positions.
//!
//! Every token, AST node and semantic node carries a [`Span`] of byte offsets
//! into the [`Source`] it came from. Line and column numbers are derived on
//! demand, so spans stay `Copy` and cheap to merge while the tree is built.

use std::fmt;

/// A span representing a range in the source text.
///
/// Spans are byte offsets from the start of the source, matching the lexer's spans.
///
/// # Example
///
/// ```
/// use glint::source::Span;
///
/// let span = Span::new(0, 5);
/// assert_eq!(span.start, 0);
/// assert_eq!(span.end, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Byte offset of the start of the span (inclusive).
    pub start: usize,
    /// Byte offset of the end of the span (exclusive).
    pub end: usize,
}

impl Span {
    /// Creates a new span from start to end byte offsets.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Creates an empty span at `offset`.
    pub fn empty(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    /// Creates a span that covers both `self` and `other`.
    ///
    /// Used when building parent nodes from their children.
    pub fn merge(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Shifts the span right by `offset` bytes.
    pub fn offset_by(&self, offset: usize) -> Span {
        Span::new(self.start + offset, self.end + offset)
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true for zero-width spans.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Span::new(range.start, range.end)
    }
}

/// A resolved location: 1-based line and column plus the 0-based byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A named, immutable source buffer.
#[derive(Debug, Clone)]
pub struct Source {
    name: String,
    text: String,
    /// Byte offset of the first character of every line.
    line_starts: Vec<usize>,
}

impl Source {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            name: name.into(),
            text,
            line_starts,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Converts a byte offset into a line/column position.
    ///
    /// Offsets past the end clamp to the end of the text. Columns count
    /// characters, not bytes.
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.text.len());
        let line_index = match self.line_starts.binary_search(&offset) {
            Ok(index) => index,
            Err(index) => index - 1,
        };
        let line_start = self.line_starts[line_index];
        let column = self
            .text
            .get(line_start..offset)
            .map_or(offset - line_start, |prefix| prefix.chars().count())
            + 1;
        Position {
            line: line_index + 1,
            column,
            offset,
        }
    }

    /// Converts a 1-based line and column back into a byte offset.
    pub fn offset(&self, line: usize, column: usize) -> Option<usize> {
        let line_start = *self.line_starts.get(line.checked_sub(1)?)?;
        let line_text = self.line_text(line)?;
        if column == 0 {
            return None;
        }
        let within = line_text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(line_text.len()))
            .nth(column - 1)?;
        Some(line_start + within)
    }

    /// The text of a 1-based line without its trailing newline.
    pub fn line_text(&self, line: usize) -> Option<&str> {
        let start = *self.line_starts.get(line.checked_sub(1)?)?;
        let end = self
            .line_starts
            .get(line)
            .map_or(self.text.len(), |next| next - 1);
        self.text.get(start..end).map(|l| l.trim_end_matches('\r'))
    }

    /// The exact text covered by `span`, if it lies on character boundaries.
    pub fn slice(&self, span: Span) -> Option<&str> {
        self.text.get(span.start..span.end)
    }

    /// Start and end positions of a span.
    pub fn positions(&self, span: Span) -> (Position, Position) {
        (self.position(span.start), self.position(span.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_merge() {
        let a = Span::new(5, 10);
        let b = Span::new(15, 25);
        let merged = a.merge(&b);
        assert_eq!(merged, Span::new(5, 25));
    }

    #[test]
    fn test_span_from_range() {
        let span: Span = (5..10).into();
        assert_eq!(span.start, 5);
        assert_eq!(span.end, 10);
        assert_eq!(span.len(), 5);
    }

    #[test]
    fn test_position_lines_and_columns() {
        let source = Source::new("test", "# x = 1\n# y = 2\nx + y");
        assert_eq!(
            source.position(0),
            Position {
                line: 1,
                column: 1,
                offset: 0
            }
        );
        let pos = source.position(10);
        assert_eq!((pos.line, pos.column), (2, 3));
        let pos = source.position(16);
        assert_eq!((pos.line, pos.column), (3, 1));
    }

    #[test]
    fn test_position_counts_characters() {
        let source = Source::new("test", "# s = “∞”");
        // The closing quote starts after two three-byte characters.
        let pos = source.position(source.text().len() - 3);
        assert_eq!(pos.column, 9);
    }

    #[test]
    fn test_offset_round_trip() {
        let source = Source::new("test", "ab\ncdé\nf");
        for offset in [0, 1, 3, 5, 8] {
            let pos = source.position(offset);
            assert_eq!(source.offset(pos.line, pos.column), Some(offset));
        }
        assert_eq!(source.offset(9, 1), None);
    }

    #[test]
    fn test_line_text() {
        let source = Source::new("test", "first\r\nsecond");
        assert_eq!(source.line_text(1), Some("first"));
        assert_eq!(source.line_text(2), Some("second"));
        assert_eq!(source.line_text(3), None);
    }
}
