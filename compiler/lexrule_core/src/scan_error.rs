//! Fatal errors raised by patterns while scanning a literal.

use std::fmt;

/// What went wrong inside a pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScanErrorKind {
    /// End of input reached before the closing quote.
    UnterminatedString,
    /// A raw, unescaped newline inside a quoted literal.
    MultilineString,
}

impl ScanErrorKind {
    /// Human-readable message, as shown in diagnostics.
    pub fn message(self) -> &'static str {
        match self {
            ScanErrorKind::UnterminatedString => "unterminated string literal",
            ScanErrorKind::MultilineString => "string literal must be on a single line",
        }
    }
}

impl fmt::Display for ScanErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A fatal pattern error, anchored at a byte range of the source.
///
/// Patterns return this instead of "no match" when the input can never be
/// valid, so the driver stops instead of trying the next rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[error("{kind}")]
pub struct ScanError {
    pub kind: ScanErrorKind,
    /// Byte offset the error points at.
    pub offset: usize,
    /// Length of the offending text, in characters.
    pub len: usize,
}

impl ScanError {
    pub fn new(kind: ScanErrorKind, offset: usize, len: usize) -> Self {
        ScanError { kind, offset, len }
    }
}
