//! The five-line source snippet report.
//!
//! ```text
//! error: <summary>
//! --> line:<L>:<C>
//!    |
//! <L> | <source line>
//!    | <indent>^^^ <message>
//! ```
//!
//! The gutter is as wide as the line number, so the `|` column lines up
//! between the source line and the pointer line whatever the line number's
//! digit count. The pointer indent copies tabs from the source line so the
//! carets land under the right character in any tab-width setting.

use std::fmt::Write;

use crate::color::codes;
use crate::ColorMode;

/// Everything needed to render one error report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Snippet<'a> {
    /// Text after `error: ` on the first line.
    pub summary: &'a str,
    /// Text after the carets on the pointer line.
    pub message: &'a str,
    /// 1-based line number of the error.
    pub line: u32,
    /// 1-based column (in characters) of the first offending character.
    pub column: u32,
    /// Number of characters to underline. Zero still draws one caret.
    pub len: usize,
    /// The source line the error sits on, without its line terminator.
    pub line_text: &'a str,
}

impl Snippet<'_> {
    /// Render without colour.
    pub fn render(&self) -> String {
        self.render_with(false)
    }

    /// Render, colouring according to `mode`.
    pub fn render_colored(&self, mode: ColorMode, is_tty: bool) -> String {
        self.render_with(mode.should_use_colors(is_tty))
    }

    fn render_with(&self, colors: bool) -> String {
        let paint = |text: &str, color: &str| -> String {
            if colors {
                format!("{color}{text}{}", codes::RESET)
            } else {
                text.to_owned()
            }
        };

        let width = gutter_width(self.line);
        let pad = " ".repeat(width);
        let bar = paint("|", codes::GUTTER);
        let carets = "^".repeat(self.len.max(1));

        let mut out = String::new();
        let _ = writeln!(
            out,
            "{}: {}",
            paint("error", codes::ERROR),
            paint(self.summary, codes::BOLD)
        );
        let _ = writeln!(
            out,
            "{} line:{}:{}",
            paint("-->", codes::GUTTER),
            self.line,
            self.column
        );
        let _ = writeln!(out, "{pad} {bar}");
        let _ = writeln!(
            out,
            "{} {bar} {}",
            paint(&format!("{:>width$}", self.line), codes::GUTTER),
            self.line_text
        );
        let _ = write!(
            out,
            "{pad} {bar} {}{} {}",
            caret_indent(self.line_text, self.column),
            paint(&carets, codes::ERROR),
            paint(self.message, codes::ERROR)
        );
        out
    }
}

/// The line of `source` starting at byte offset `line_start`.
///
/// Stops before the `\n` (or at end of input) and drops a trailing `\r`.
/// Returns an empty string if `line_start` is out of range.
pub fn line_text(source: &str, line_start: usize) -> &str {
    let rest = source.get(line_start..).unwrap_or_default();
    let line = rest.split('\n').next().unwrap_or_default();
    line.strip_suffix('\r').unwrap_or(line)
}

/// Decimal digit count of `line`, the width of the gutter column.
pub fn gutter_width(line: u32) -> usize {
    line.checked_ilog10().map_or(1, |digits| digits as usize + 1)
}

/// Whitespace that moves the pointer under 1-based `column` of `line_text`.
///
/// Tabs are copied as tabs; every other character becomes a space.
pub fn caret_indent(line_text: &str, column: u32) -> String {
    let skip = usize::try_from(column.saturating_sub(1)).unwrap_or(usize::MAX);
    line_text
        .chars()
        .take(skip)
        .map(|ch| if ch == '\t' { '\t' } else { ' ' })
        .collect()
}
