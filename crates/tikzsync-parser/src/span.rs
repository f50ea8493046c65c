//! Byte-offset source spans.

use std::{fmt, ops::Range};

/// A half-open byte range `start..end` into the parsed text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a new span from a byte range
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end.max(range.start),
        }
    }

    /// Get the start offset of the span
    pub fn start(&self) -> usize {
        self.start
    }

    /// Get the end offset of the span
    pub fn end(&self) -> usize {
        self.end
    }

    /// Get the length of the span
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Create a union of two spans (encompassing both)
    pub fn union(&self, other: Span) -> Span {
        Self::new(self.start.min(other.start)..self.end.max(other.end))
    }

    /// Shift the span right by `offset` bytes.
    ///
    /// Used to move a span computed against a fragment (one line, one
    /// expression) into the coordinates of the enclosing document.
    pub fn shifted(&self, offset: usize) -> Span {
        Self::new(self.start + offset..self.end + offset)
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_accessors() {
        let span = Span::new(3..8);
        assert_eq!(span.start(), 3);
        assert_eq!(span.end(), 8);
        assert_eq!(span.len(), 5);
        assert!(!span.is_empty());
        assert!(Span::new(4..4).is_empty());
    }

    #[test]
    fn test_span_reversed_range_is_empty() {
        let span = Span::new(5..2);
        assert_eq!(span.start(), 5);
        assert!(span.is_empty());
    }

    #[test]
    fn test_span_union_and_shift() {
        let span = Span::new(2..4).union(Span::new(7..9));
        assert_eq!(span, Span::new(2..9));
        assert_eq!(span.shifted(10), Span::new(12..19));
        assert_eq!(span.to_string(), "2..9");
    }
}
