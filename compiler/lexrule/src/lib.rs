//! Data-driven tokenizer over an ordered rule table.
//!
//! A [`Tokenizer`] is built from [`Rule`]s, each pairing a
//! [`Pattern`](lexrule_core::Pattern) with a token name. At every position the
//! rules are tried in table order and the first one that matches wins;
//! longest-match behaviour only exists inside a single pattern (see
//! [`patterns::one_of`]). Rules with an empty name consume text without
//! emitting a token, which is how whitespace and comments are dropped.
//!
//! ```
//! use lexrule::{patterns, CharSet, Tokenizer};
//!
//! let tokenizer = Tokenizer::builder()
//!     .skip(patterns::repeat(CharSet::whitespace()))
//!     .rule("number", patterns::number(true))
//!     .rule("op", patterns::one_of(["+", "-", "*", "/", "**"]))
//!     .build();
//!
//! let tokens = tokenizer.tokenize("2 ** 0.5")?;
//! let names: Vec<_> = tokens.iter().map(|t| (&*t.name, t.value)).collect();
//! assert_eq!(
//!     names,
//!     [("number", "2"), ("op", "**"), ("number", "0.5"), ("eof", "eof")]
//! );
//! # Ok::<(), lexrule::TokenizeError>(())
//! ```
//!
//! Failures come back as a [`TokenizeError`] that renders a source snippet:
//!
//! ```
//! use lexrule::{patterns, CharSet, Tokenizer};
//!
//! let tokenizer = Tokenizer::builder()
//!     .skip(patterns::repeat(CharSet::whitespace()))
//!     .rule("a", patterns::exact("a"))
//!     .build();
//! let err = tokenizer.tokenize("aa\na?").unwrap_err();
//! assert_eq!(err.to_string(), "unexpected character `?` at 2:2.");
//! println!("{}", err.format());
//! ```

mod error;
mod rule;
mod token;
mod tokenizer;

pub use error::{TokenizeError, TokenizeErrorKind};
pub use rule::{MatchContext, Rule, RuleName};
pub use token::{Token, EOF_NAME};
pub use tokenizer::{Tokenizer, TokenizerBuilder};

pub use lexrule_core::{
    patterns, CharSet, Cursor, LineStarts, Pattern, PatternResult, Position, ScanError,
    ScanErrorKind, Trie,
};
pub use lexrule_diagnostic::ColorMode;

#[cfg(feature = "subscriber")]
static TRACING_INIT: std::sync::Once = std::sync::Once::new();

/// Install a `fmt` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset, and only the first call has any
/// effect. `RUST_LOG=lexrule=trace` logs every emitted and discarded match;
/// `debug` logs one line per tokenize call and per trie built.
#[cfg(feature = "subscriber")]
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var_os("RUST_LOG").is_none() {
            return;
        }
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    });
}
