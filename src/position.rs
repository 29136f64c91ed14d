use crate::strip::MatchSpan;

/// Position in a text file (line and column numbers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed, in bytes)
    pub column: usize,
}

/// Byte span in a text file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Starting byte offset
    pub byte_start: usize,
    /// Ending byte offset (exclusive)
    pub byte_end: usize,
}

/// Byte offset at which each `\n`-separated line starts
///
/// Always has at least one entry; a trailing newline yields a final empty line.
pub fn line_offsets(content: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    offsets.extend(
        content
            .bytes()
            .enumerate()
            .filter(|(_, b)| *b == b'\n')
            .map(|(i, _)| i + 1),
    );
    offsets
}

/// Convert a dropped line range to the byte range it removed
///
/// A span in the middle of the text covers its lines plus the newline that
/// ends its last line. A span that reaches the final line has no newline of
/// its own; rejoining the kept lines removes the newline *before* it instead,
/// so the range starts one byte earlier.
///
/// # Arguments
/// * `offsets` - Line start offsets from [`line_offsets`]
/// * `content_len` - Byte length of the text
/// * `span` - Dropped line range
///
/// # Returns
/// * `Span` such that deleting `byte_start..byte_end` from the text gives the
///   same result as dropping this span's lines alone
pub fn match_span_to_bytes(offsets: &[usize], content_len: usize, span: &MatchSpan) -> Span {
    let start = offsets.get(span.start).copied().unwrap_or(content_len);
    if span.end >= offsets.len() {
        let byte_start = if span.start > 0 { start.saturating_sub(1) } else { start };
        return Span {
            byte_start,
            byte_end: content_len,
        };
    }
    Span {
        byte_start: start,
        byte_end: offsets[span.end],
    }
}

/// First and last line of a dropped range (both 1-indexed, inclusive)
pub fn match_span_to_positions(span: &MatchSpan) -> (Position, Position) {
    let start = Position {
        line: span.start + 1,
        column: 1,
    };
    let end = Position {
        line: span.end.max(span.start + 1),
        column: 1,
    };
    (start, end)
}
