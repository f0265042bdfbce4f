//! Character cursor over the source text of one tokenize call.
//!
//! The cursor is the only read head patterns get: they move it forward with
//! [`Cursor::next`] and backward with [`Cursor::back`], one `char` at a time.
//! Every offset the cursor exposes is therefore a char boundary, so slicing
//! between two cursor positions can never split a UTF-8 sequence.
//!
//! As a side effect of moving forward over a `\n`, the cursor records the
//! following offset in its [`LineStarts`] table. Positions are resolved
//! against that table, so lines become known exactly when the scan reaches
//! them.

use std::cell::Cell;

use crate::line_starts::{char_count, to_u32, LineStarts, Position};

/// The last position resolved by [`Cursor::position`].
///
/// A later offset on the same line counts its column from here instead of
/// from the line start, so resolving token starts left to right costs
/// O(log L) for the line plus the chars between consecutive tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ColumnMark {
    line_start: usize,
    offset: usize,
    column: u32,
}

impl ColumnMark {
    const START: ColumnMark = ColumnMark {
        line_start: 0,
        offset: 0,
        column: 1,
    };
}

/// Read head over a source string.
///
/// # Invariant
///
/// `pos <= source.len()` and `pos` is a char boundary of `source`.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    source: &'a str,
    pos: usize,
    line_starts: LineStarts,
    column_mark: Cell<ColumnMark>,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at offset 0 with a fresh line-start table.
    pub fn new(source: &'a str) -> Self {
        Cursor {
            source,
            pos: 0,
            line_starts: LineStarts::new(),
            column_mark: Cell::new(ColumnMark::START),
        }
    }

    /// The full source text.
    #[inline]
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Current byte offset.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Returns `true` once every character has been consumed.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Unconsumed remainder of the source.
    #[inline]
    pub fn rest(&self) -> &'a str {
        self.source.get(self.pos..).unwrap_or_default()
    }

    /// Consume one character.
    ///
    /// Returns `None` at end of input without moving. Consuming a `\n`
    /// records the offset right after it as a line start.
    #[allow(
        clippy::should_implement_trait,
        reason = "cursor steps both ways and records line starts; not an Iterator"
    )]
    #[inline]
    pub fn next(&mut self) -> Option<char> {
        let ch = self.rest().chars().next()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line_starts.record(self.pos);
        }
        Some(ch)
    }

    /// Step back over one character and return it.
    ///
    /// Returns `None` at offset 0 without moving. Recorded line starts are
    /// kept: they describe the source, not the cursor.
    #[inline]
    pub fn back(&mut self) -> Option<char> {
        let ch = self.source.get(..self.pos)?.chars().next_back()?;
        self.pos -= ch.len_utf8();
        Some(ch)
    }

    /// The next character, without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Move the cursor back to an earlier snapshot of [`pos`](Self::pos).
    ///
    /// # Contract
    ///
    /// `pos` must have been returned by [`pos`](Self::pos) on this cursor
    /// and must not be ahead of the current position: jumping forward would
    /// skip line-start recording.
    #[inline]
    pub fn restore(&mut self, pos: usize) {
        debug_assert!(
            self.source.is_char_boundary(pos),
            "restore target {pos} is not a char boundary"
        );
        self.pos = pos.min(self.source.len());
    }

    /// Extract `start..end` of the source.
    ///
    /// Returns an empty string if the range is out of bounds or not on char
    /// boundaries, which cannot happen for offsets taken from this cursor.
    #[inline]
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        debug_assert!(start <= end, "slice start {start} exceeds end {end}");
        self.source.get(start..end).unwrap_or_default()
    }

    /// Extract the source from `start` to the current position.
    #[inline]
    pub fn slice_from(&self, start: usize) -> &'a str {
        self.slice(start, self.pos)
    }

    /// Advance to the next `\n` (not consuming it) or to end of input.
    ///
    /// Never crosses a newline, so no line start is recorded.
    pub fn eat_until_newline(&mut self) {
        let remaining = self.rest().as_bytes();
        self.pos += memchr::memchr(b'\n', remaining).unwrap_or(remaining.len());
    }

    /// Consume characters while `pred` holds. Returns how many were eaten.
    pub fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
        let mut eaten = 0;
        while self.peek().is_some_and(&pred) {
            self.next();
            eaten += 1;
        }
        eaten
    }

    /// Line starts recorded so far.
    #[inline]
    pub fn line_starts(&self) -> &LineStarts {
        &self.line_starts
    }

    /// Resolve `offset` against the line starts recorded so far.
    ///
    /// Accurate for any offset the cursor has already reached. Agrees with
    /// [`LineStarts::position`]; offsets resolved in increasing order only
    /// count the chars since the previous call on the same line.
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.source.len());
        let (line, line_start) = self.line_starts.locate(offset);
        let mark = self.column_mark.get();
        let (from, column) = if mark.line_start == line_start && mark.offset <= offset {
            (mark.offset, mark.column)
        } else {
            (line_start, 1)
        };
        let counted = self.source.get(from..offset).map_or(0, char_count);
        let column = column.saturating_add(to_u32(counted));
        self.column_mark.set(ColumnMark {
            line_start,
            offset,
            column,
        });
        Position::new(line, column)
    }
}
