//! Human-readable rendering of source-anchored errors.
//!
//! The renderer knows nothing about tokenizing: callers hand it the
//! already-resolved line, column, length and source line through a
//! [`Snippet`], and get back the report as a `String`.
//!
//! ```
//! use lexrule_diagnostic::Snippet;
//!
//! let snippet = Snippet {
//!     summary: "unexpected character `$` at 1:5.",
//!     message: "unexpected character `$`",
//!     line: 1,
//!     column: 5,
//!     len: 1,
//!     line_text: "let $x = 1",
//! };
//! let expected = [
//!     "error: unexpected character `$` at 1:5.",
//!     "--> line:1:5",
//!     "  |",
//!     "1 | let $x = 1",
//!     "  |     ^ unexpected character `$`",
//! ]
//! .join("\n");
//! assert_eq!(snippet.render(), expected);
//! ```

mod color;
pub mod snippet;

pub use color::ColorMode;
pub use snippet::{caret_indent, gutter_width, line_text, Snippet};
