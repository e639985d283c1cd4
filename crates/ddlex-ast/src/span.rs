//! Source location tracking

use serde::{Deserialize, Serialize};

/// A span representing a range in source code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Byte offset of the start
    pub start: usize,
    /// Byte offset of the end (exclusive)
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn dummy() -> Self {
        Self { start: 0, end: 0 }
    }

    /// Merge two spans into one that covers both
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// 1-based line and column of the span start within `source`.
    ///
    /// Columns count characters, not bytes. Offsets past the end of the
    /// source resolve to the position just after the last character.
    pub fn location(&self, source: &str) -> Location {
        let offset = floor_char_boundary(source, self.start);
        let before = &source[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[line_start..].chars().count() + 1;
        Location { line, column }
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::dummy()
    }
}

/// A human-facing source position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

/// Clamp `offset` into `source` and move it back onto a char boundary.
pub fn floor_char_boundary(source: &str, offset: usize) -> usize {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_first_line() {
        let loc = Span::new(7, 12).location("CREATE TABLE t");
        assert_eq!(loc, Location { line: 1, column: 8 });
    }

    #[test]
    fn test_location_after_newlines() {
        let source = "CREATE TABLE t (\n  a INT,\n  b BLOB\n)";
        let offset = source.find("b BLOB").unwrap();
        let loc = Span::new(offset, offset + 1).location(source);
        assert_eq!(loc, Location { line: 3, column: 3 });
    }

    #[test]
    fn test_location_past_end() {
        let loc = Span::new(100, 100).location("ab\ncd");
        assert_eq!(loc, Location { line: 2, column: 3 });
    }

    #[test]
    fn test_location_counts_chars_not_bytes() {
        let source = "-- héllo\nx";
        let loc = Span::new(source.len() - 1, source.len()).location(source);
        assert_eq!(loc, Location { line: 2, column: 1 });
        let loc = Span::new(source.find('l').unwrap(), 0).location(source);
        assert_eq!(loc.column, 6);
    }
}
