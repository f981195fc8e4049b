//! Text spans and position conversions.
//!
//! Spans are half-open byte ranges into document text. Hosts that receive
//! editor positions (1-indexed line and column) convert them with
//! [`position_to_byte_offset`] before asking the engine for suggestions.
//!
//! ## Coordinate Conventions
//!
//! - Lines and columns are **1-indexed** (matching editor conventions)
//! - Byte offsets are **0-indexed**
//! - Columns count Unicode scalar values, not bytes

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Span
// ============================================================================

/// A byte range `[start, end)` in document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Create a new span.
    ///
    /// # Panics
    /// Panics if `start > end`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(
            start <= end,
            "Span start ({}) must be <= end ({})",
            start,
            end
        );
        Span { start, end }
    }

    /// An empty span at `offset` (a caret with no selection).
    pub fn caret(offset: usize) -> Self {
        Span {
            start: offset,
            end: offset,
        }
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
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
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

// ============================================================================
// Position Conversions
// ============================================================================

/// Convert a byte offset to 1-indexed line and column.
///
/// If `offset` exceeds the content length, returns the position at the end
/// of the content.
pub fn byte_offset_to_position(content: &str, offset: usize) -> (u32, u32) {
    let mut line = 1u32;
    let mut col = 1u32;
    let mut current_offset = 0usize;

    for ch in content.chars() {
        if current_offset >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
        current_offset += ch.len_utf8();
    }

    (line, col)
}

/// Convert 1-indexed line and column to a byte offset.
///
/// Line/column values of 0 are treated as 1. A column past the end of its
/// line clamps to the line end; a line past the end of the content returns
/// the content length.
pub fn position_to_byte_offset(content: &str, line: u32, col: u32) -> usize {
    let line = line.max(1);
    let col = col.max(1);

    let line_start = if line == 1 {
        Some(0)
    } else {
        content
            .match_indices('\n')
            .nth(line as usize - 2)
            .map(|(i, _)| i + 1)
    };

    let Some(start) = line_start else {
        return content.len();
    };

    for (current_col, (j, c)) in (1u32..).zip(content[start..].char_indices()) {
        if current_col == col || c == '\n' {
            return start + j;
        }
    }
    content.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    mod span_tests {
        use super::*;

        #[test]
        fn caret_is_empty() {
            let span = Span::caret(7);
            assert!(span.is_empty());
            assert_eq!(span.len(), 0);
        }

        #[test]
        fn contains_includes_boundaries() {
            let outer = Span::new(4, 10);
            assert!(outer.contains(&Span::new(4, 10)));
            assert!(outer.contains(&Span::caret(10)));
            assert!(!outer.contains(&Span::new(3, 5)));
        }

        #[test]
        #[should_panic(expected = "must be <= end")]
        fn inverted_span_panics() {
            let _ = Span::new(5, 1);
        }

        #[test]
        fn display_is_half_open() {
            assert_eq!(Span::new(2, 9).to_string(), "[2, 9)");
        }
    }

    mod position_tests {
        use super::*;

        const SOURCE: &str = "var calc = x;\ncalc.Add();\n";

        #[test]
        fn offset_to_position_second_line() {
            let offset = SOURCE.find("Add").unwrap();
            assert_eq!(byte_offset_to_position(SOURCE, offset), (2, 6));
        }

        #[test]
        fn position_to_offset_round_trips() {
            let offset = SOURCE.find("Add").unwrap();
            let (line, col) = byte_offset_to_position(SOURCE, offset);
            assert_eq!(position_to_byte_offset(SOURCE, line, col), offset);
        }

        #[test]
        fn column_past_line_end_clamps() {
            assert_eq!(position_to_byte_offset(SOURCE, 1, 99), 13);
        }

        #[test]
        fn line_past_end_returns_len() {
            assert_eq!(position_to_byte_offset(SOURCE, 40, 1), SOURCE.len());
        }

        #[test]
        fn zero_line_and_column_clamp_to_one() {
            assert_eq!(position_to_byte_offset(SOURCE, 0, 0), 0);
        }

        #[test]
        fn column_counts_chars_not_bytes() {
            let source = "var s = \"é\"; calc.Add();\n";
            let offset = source.find("calc").unwrap();
            assert_eq!(position_to_byte_offset(source, 1, 14), offset);
        }
    }
}
