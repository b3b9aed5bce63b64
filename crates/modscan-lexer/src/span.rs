//! Source location tracking.
//!
//! Every import and export record points back into the scanned buffer with
//! `Span`s. Offsets are code-unit indices of that buffer.

use crate::unit::CodeUnit;

/// A span in the source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Span {
    /// Offset of the start.
    pub start: u32,
    /// Offset of the end (exclusive).
    pub end: u32,
}

impl Span {
    /// Create a new span.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Length of the span in code units.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Check if the span is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if this span contains an offset.
    #[inline]
    pub const fn contains(&self, offset: u32) -> bool {
        offset >= self.start && offset < self.end
    }

    /// The units this span covers, or `None` if it lies outside `source`.
    #[inline]
    pub fn slice<'s, U>(&self, source: &'s [U]) -> Option<&'s [U]> {
        source.get(self.start as usize..self.end as usize)
    }
}

/// A 1-indexed source position, as shown to people.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: u32,
    /// Counted in code units of the scanned buffer.
    pub column: u32,
}

/// Offset to line/column lookup over a scanned buffer.
///
/// Lines are split at `\n`, so a `\r\n` pair ends one line and a lone `\r`
/// does not.
#[derive(Debug)]
pub struct LineIndex {
    /// Offsets of the start of each line.
    line_starts: Vec<u32>,
}

impl LineIndex {
    /// Index UTF-8 source. Offsets are byte offsets.
    pub fn new(source: &str) -> Self {
        Self::from_units(source.as_bytes())
    }

    /// Index any scanned buffer, with offsets in its code units.
    pub fn from_units<U: CodeUnit>(source: &[U]) -> Self {
        let line_starts = std::iter::once(0)
            .chain(
                source
                    .iter()
                    .enumerate()
                    .filter(|(_, u)| u.to_ascii() == b'\n')
                    .map(|(i, _)| (i + 1) as u32),
            )
            .collect();
        Self { line_starts }
    }

    /// Line and column of `offset`, both 0-indexed.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        (line as u32, offset - self.line_starts[line])
    }

    /// Line and column of `offset`, both 1-indexed.
    pub fn location(&self, offset: u32) -> Location {
        let (line, column) = self.line_col(offset);
        Location {
            line: line + 1,
            column: column + 1,
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_slice() {
        let source = b"import 'a'";
        assert_eq!(Span::new(8, 9).slice(source), Some(&b"a"[..]));
        assert_eq!(Span::new(8, 20).slice(source), None);
        assert_eq!(Span::new(8, 9).len(), 1);
        assert!(Span::new(3, 3).is_empty());
        assert!(Span::new(3, 5).contains(4));
        assert!(!Span::new(3, 5).contains(5));
    }

    #[test]
    fn test_line_index() {
        let source = "line1\nline2\nline3";
        let index = LineIndex::new(source);

        assert_eq!(index.line_col(0), (0, 0));  // 'l' of line1
        assert_eq!(index.line_col(5), (0, 5));  // '\n' after line1
        assert_eq!(index.line_col(6), (1, 0));  // 'l' of line2
        assert_eq!(index.line_col(12), (2, 0)); // 'l' of line3
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.location(7), Location { line: 2, column: 2 });
    }

    #[test]
    fn test_line_index_utf16_units() {
        let units: Vec<u16> = "\u{1F600}\nab".encode_utf16().collect();
        let index = LineIndex::from_units(&units);
        // Two surrogate units, then the newline.
        assert_eq!(index.line_col(3), (1, 0));
        assert_eq!(LineIndex::new("\u{1F600}\nab").line_col(5), (1, 0));
    }

    #[test]
    fn test_line_index_crlf() {
        let index = LineIndex::new("a\r\nb\rc");
        assert_eq!(index.line_col(3), (1, 0));
        assert_eq!(index.line_col(5), (1, 2));
    }
}
