//! Low-level building blocks for rule-table tokenizers.
//!
//! This crate owns everything a pattern needs to look at source text:
//!
//! - [`Cursor`]: the single read head shared by all patterns during one
//!   tokenize call, moving one `char` at a time with [`Cursor::next`] and
//!   [`Cursor::back`].
//! - [`LineStarts`]: the line-start table the cursor grows as it crosses
//!   newlines, resolving offsets to 1-based [`Position`]s by binary search.
//! - [`CharSet`] and [`Trie`]: immutable lookup structures used by the
//!   built-in patterns.
//! - [`patterns`]: the [`Pattern`] trait and its built-in constructors.
//!
//! The tokenizer driver lives in the `lexrule` crate.

mod char_set;
mod cursor;
mod line_starts;
pub mod patterns;
mod scan_error;
mod trie;

pub use char_set::CharSet;
pub use cursor::Cursor;
pub use line_starts::{LineStarts, Position};
pub use patterns::{Pattern, PatternResult};
pub use scan_error::{ScanError, ScanErrorKind};
pub use trie::{NodeId, Trie};
