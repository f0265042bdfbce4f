//! Line-start table and offset to (line, column) resolution.
//!
//! The table is grown incrementally by the [`Cursor`](crate::Cursor) as it
//! consumes newlines. Lookups binary-search the recorded starts: O(log L)
//! where L is the number of lines seen so far.

use std::fmt;

/// A 1-based line/column pair.
///
/// Columns count characters (not bytes) from the start of the line, so a
/// column always lines up with what an editor shows for UTF-8 text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number, in characters.
    pub column: u32,
}

impl Position {
    pub const fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Sorted byte offsets of every line start discovered so far.
///
/// # Invariant
///
/// `starts[0] == 0` and the offsets are strictly increasing. Recording an
/// offset that is not past the last entry is a no-op, which makes
/// [`record`](Self::record) idempotent when the cursor re-reads a newline
/// after backing up over it.
///
/// # Example
///
/// ```
/// use lexrule_core::{LineStarts, Position};
///
/// let source = "line1\nline2\nline3";
/// let table = LineStarts::scan(source);
///
/// assert_eq!(table.position(source, 0), Position::new(1, 1));
/// assert_eq!(table.position(source, 6), Position::new(2, 1));
/// assert_eq!(table.position(source, 14), Position::new(3, 3));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineStarts {
    starts: Vec<usize>,
}

impl Default for LineStarts {
    fn default() -> Self {
        Self::new()
    }
}

impl LineStarts {
    /// A table containing only the first line (offset 0).
    pub fn new() -> Self {
        LineStarts { starts: vec![0] }
    }

    /// Build the complete table for `source` in one pass.
    pub fn scan(source: &str) -> Self {
        let mut table = Self::new();
        for newline in memchr::memchr_iter(b'\n', source.as_bytes()) {
            table.record(newline + 1);
        }
        table
    }

    /// Forget everything but the first line.
    pub fn reset(&mut self) {
        self.starts.truncate(1);
    }

    /// Record `offset` as the start of a line.
    ///
    /// Offsets at or before the last recorded start are ignored.
    #[inline]
    pub fn record(&mut self, offset: usize) {
        if self.starts.last().is_none_or(|&last| offset > last) {
            self.starts.push(offset);
        }
    }

    /// Number of recorded line starts (always at least 1).
    #[inline]
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Recorded line starts in ascending order.
    pub fn as_slice(&self) -> &[usize] {
        &self.starts
    }

    /// Index of the greatest recorded start `<= offset`.
    #[inline]
    fn line_index(&self, offset: usize) -> usize {
        match self.starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        }
    }

    /// 1-based line number containing `offset`.
    pub fn line_of(&self, offset: usize) -> u32 {
        to_u32(self.line_index(offset) + 1)
    }

    /// Byte offset at which the 1-based `line` starts.
    ///
    /// Returns `None` for line 0 and for lines not yet recorded.
    pub fn line_start(&self, line: u32) -> Option<usize> {
        let index = usize::try_from(line.checked_sub(1)?).ok()?;
        self.starts.get(index).copied()
    }

    /// Resolve `offset` in `source` to a 1-based [`Position`].
    ///
    /// `source` must be the text the table was built for. Offsets past the
    /// end of `source` are clamped when counting the column.
    pub fn position(&self, source: &str, offset: usize) -> Position {
        let (line, start) = self.locate(offset);
        let end = offset.min(source.len());
        let column = source.get(start..end).map_or(0, char_count);
        Position {
            line,
            column: to_u32(column + 1),
        }
    }

    /// 1-based line containing `offset` and the byte offset it starts at.
    #[inline]
    pub(crate) fn locate(&self, offset: usize) -> (u32, usize) {
        let index = self.line_index(offset);
        (to_u32(index + 1), self.starts[index])
    }
}

/// Number of chars in `text`. ASCII text is counted by its byte length.
#[inline]
pub(crate) fn char_count(text: &str) -> usize {
    if text.is_ascii() {
        text.len()
    } else {
        text.chars().count()
    }
}

/// Saturating `usize -> u32` conversion for line and column numbers.
#[inline]
pub(crate) fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
