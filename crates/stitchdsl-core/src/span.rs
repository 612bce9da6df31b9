//! Byte spans into DSL source text.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Byte offsets into source text.
///
/// Spans are half-open intervals: `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: u64,
    /// End byte offset (exclusive).
    pub end: u64,
}

impl Span {
    /// Create a new span.
    ///
    /// # Panics
    /// Panics if `start > end`.
    pub fn new(start: u64, end: u64) -> Self {
        assert!(start <= end, "Span start ({start}) must be <= end ({end})");
        Span { start, end }
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// Check if span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if this span contains another span entirely.
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Slice `source` by this span, if it lies on char boundaries within bounds.
    pub fn text<'s>(&self, source: &'s str) -> Option<&'s str> {
        let start = usize::try_from(self.start).ok()?;
        let end = usize::try_from(self.end).ok()?;
        source.get(start..end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_len_and_empty() {
        let span = Span::new(4, 12);
        assert_eq!(span.len(), 8);
        assert!(!span.is_empty());
        assert!(Span::new(3, 3).is_empty());
    }

    #[test]
    #[should_panic(expected = "must be <= end")]
    fn test_span_rejects_inverted_range() {
        let _ = Span::new(5, 2);
    }

    #[test]
    fn test_span_contains() {
        let outer = Span::new(0, 20);
        assert!(outer.contains(&Span::new(3, 9)));
        assert!(outer.contains(&outer));
        assert!(!Span::new(3, 9).contains(&outer));
    }

    #[test]
    fn test_span_text() {
        let source = "authorId: ID => renamed from author.id";
        let span = Span::new(29, 38);
        assert_eq!(span.text(source), Some("author.id"));
        assert_eq!(Span::new(30, 99).text(source), None);
    }

    #[test]
    fn test_span_display() {
        assert_eq!(Span::new(1, 7).to_string(), "[1, 7)");
    }
}
