//! Tokenize failures and their rendering.
//!
//! Every lexical error is fatal for the call that raised it: the scan stops,
//! no partial token list is returned, and the error carries the whole source
//! so it can render itself without the caller keeping anything around.

use std::sync::Arc;

use lexrule_core::{Cursor, LineStarts, Position, ScanError, ScanErrorKind};
use lexrule_diagnostic::{line_text, ColorMode, Snippet};

/// What kind of lexical error occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenizeErrorKind {
    /// No rule matched at the current position.
    UnexpectedCharacter,
    /// A string literal reached end of input before its closing quote.
    UnterminatedString,
    /// A string literal contained a raw newline.
    MultilineString,
}

impl From<ScanErrorKind> for TokenizeErrorKind {
    fn from(kind: ScanErrorKind) -> Self {
        match kind {
            ScanErrorKind::UnterminatedString => TokenizeErrorKind::UnterminatedString,
            ScanErrorKind::MultilineString => TokenizeErrorKind::MultilineString,
        }
    }
}

/// A tokenize failure anchored in the source.
///
/// `Display` gives the one-line form (`"<message> at <line>:<column>."`);
/// [`format`](Self::format) gives the full snippet report.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message} at {line}:{column}.")]
pub struct TokenizeError {
    kind: TokenizeErrorKind,
    message: String,
    source_text: Arc<str>,
    start: usize,
    len: usize,
    line: u32,
    column: u32,
}

impl TokenizeError {
    /// Build an error at `start`, `len` characters long.
    ///
    /// `position` must be the 1-based position of `start` in `source`.
    pub fn new(
        kind: TokenizeErrorKind,
        message: impl Into<String>,
        source: &str,
        start: usize,
        len: usize,
        position: Position,
    ) -> Self {
        TokenizeError {
            kind,
            message: message.into(),
            source_text: Arc::from(source),
            start,
            len,
            line: position.line,
            column: position.column,
        }
    }

    /// Convert a pattern error raised while scanning `cursor`'s source.
    pub(crate) fn from_scan(err: ScanError, cursor: &Cursor<'_>) -> Self {
        TokenizeError::new(
            err.kind.into(),
            err.kind.message(),
            cursor.source(),
            err.offset,
            err.len,
            cursor.position(err.offset),
        )
    }

    pub fn kind(&self) -> TokenizeErrorKind {
        self.kind
    }

    /// The bare message, without location.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The full text that was being tokenized.
    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    /// Byte offset the error points at.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Length of the offending text, in characters.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the error points at no text (end of input).
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 1-based line of [`start`](Self::start).
    pub fn line(&self) -> u32 {
        self.line
    }

    /// 1-based column of [`start`](Self::start), in characters.
    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Render the multi-line snippet report.
    ///
    /// ```text
    /// error: unexpected character `$` at 2:5.
    /// --> line:2:5
    ///   |
    /// 2 | baz $ux
    ///   |     ^ unexpected character `$`
    /// ```
    pub fn format(&self) -> String {
        self.format_colored(ColorMode::Never, false)
    }

    /// [`format`](Self::format) with ANSI colours when `mode` calls for it.
    pub fn format_colored(&self, mode: ColorMode, is_tty: bool) -> String {
        let summary = self.to_string();
        let line_start = LineStarts::scan(&self.source_text)
            .line_start(self.line)
            .unwrap_or(self.source_text.len());
        Snippet {
            summary: &summary,
            message: &self.message,
            line: self.line,
            column: self.column,
            len: self.len,
            line_text: line_text(&self.source_text, line_start),
        }
        .render_colored(mode, is_tty)
    }
}
