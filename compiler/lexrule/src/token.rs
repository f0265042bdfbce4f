//! Emitted tokens.

use std::borrow::Cow;
use std::ops::Range;

/// Name of the token appended after the last real token.
pub const EOF_NAME: &str = "eof";

/// One lexeme with its category and location.
///
/// `value` borrows the source text, so tokens live as long as the string
/// that was tokenized. Offsets are byte offsets (half-open `start..end`);
/// `line` and `column` are 1-based and describe `start`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Token<'src> {
    /// Category, as produced by the rule's name. Never empty.
    pub name: Cow<'static, str>,
    /// The exact matched text, delimiters and escapes included.
    pub value: &'src str,
    pub start: usize,
    pub end: usize,
    pub line: u32,
    pub column: u32,
}

impl<'src> Token<'src> {
    /// Byte range of the token in the source.
    #[inline]
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Returns `true` for the end-of-input token.
    ///
    /// Only the end-of-input token has an empty span.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if the token's name is `name`.
    #[inline]
    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    pub(crate) fn eof(name: &'static str, source: &'src str, line: u32) -> Self {
        Token {
            name: Cow::Borrowed(name),
            value: name,
            start: source.len(),
            end: source.len(),
            line,
            column: 0,
        }
    }
}
