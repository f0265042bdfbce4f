//! The pattern contract and the built-in pattern constructors.
//!
//! A [`Pattern`] looks at the text under a [`Cursor`] and either:
//!
//! - consumes a non-empty lexeme and returns it as `Ok(Some(lexeme))`,
//!   leaving the cursor right after it,
//! - returns `Ok(None)` ("no match"), or
//! - returns `Err(ScanError)` when the text can never lex (an unterminated
//!   string, for example).
//!
//! The driver snapshots the cursor before each attempt and restores it on
//! `Ok(None)`, so a pattern may give up wherever it stopped. The built-in
//! patterns restore the cursor themselves anyway, which keeps them safe to
//! combine inside custom patterns.
//!
//! Custom patterns are plain closures wrapped with [`from_fn`]:
//!
//! ```
//! use lexrule_core::{patterns, Cursor, Pattern};
//!
//! // `@` followed by at least one letter.
//! let mention = patterns::from_fn(|cursor: &mut Cursor<'_>| {
//!     let start = cursor.pos();
//!     if cursor.next() != Some('@') || cursor.eat_while(char::is_alphabetic) == 0 {
//!         return Ok(None);
//!     }
//!     Ok(Some(cursor.slice_from(start)))
//! });
//!
//! let mut cursor = Cursor::new("@ferris!");
//! assert_eq!(mention.scan(&mut cursor), Ok(Some("@ferris")));
//! ```

use crate::{CharSet, Cursor, ScanError, ScanErrorKind, Trie};

/// Outcome of one pattern attempt.
pub type PatternResult<'a> = Result<Option<&'a str>, ScanError>;

/// A matcher over the cursor. See the [module docs](self) for the contract.
pub trait Pattern: Send + Sync {
    fn scan<'a>(&self, cursor: &mut Cursor<'a>) -> PatternResult<'a>;
}

impl<F> Pattern for F
where
    F: for<'a> Fn(&mut Cursor<'a>) -> PatternResult<'a> + Send + Sync,
{
    fn scan<'a>(&self, cursor: &mut Cursor<'a>) -> PatternResult<'a> {
        self(cursor)
    }
}

/// Pin a closure to the higher-ranked signature [`Pattern`] requires.
///
/// Closures returning borrowed data only infer a lifetime-generic signature
/// when passed straight into a bound like this one.
pub fn from_fn<F>(f: F) -> F
where
    F: for<'a> Fn(&mut Cursor<'a>) -> PatternResult<'a> + Send + Sync,
{
    f
}

/// Give up: put the cursor back at `start` and report no match.
#[inline]
fn miss<'a>(cursor: &mut Cursor<'a>, start: usize) -> PatternResult<'a> {
    cursor.restore(start);
    Ok(None)
}

// === Exact value ===

/// Matches one fixed string. Built by [`exact`].
#[derive(Clone, Debug)]
pub struct Exact {
    value: String,
}

/// Match `value` exactly. An empty `value` never matches.
pub fn exact(value: impl Into<String>) -> Exact {
    Exact {
        value: value.into(),
    }
}

impl Pattern for Exact {
    fn scan<'a>(&self, cursor: &mut Cursor<'a>) -> PatternResult<'a> {
        let start = cursor.pos();
        if self.value.is_empty() {
            return Ok(None);
        }
        for expected in self.value.chars() {
            if cursor.next() != Some(expected) {
                return miss(cursor, start);
            }
        }
        Ok(Some(cursor.slice_from(start)))
    }
}

// === Trie longest match ===

/// Longest match among a fixed set of words. Built by [`one_of`].
#[derive(Clone, Debug)]
pub struct OneOf {
    trie: Trie,
}

/// Match the longest of `words` that prefixes the remaining input.
///
/// Registration order does not matter: `one_of(["=", "=="])` and
/// `one_of(["==", "="])` both match `==` in `==1`.
pub fn one_of<I, S>(words: I) -> OneOf
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    OneOf {
        trie: Trie::new(words),
    }
}

impl OneOf {
    /// The underlying trie.
    pub fn trie(&self) -> &Trie {
        &self.trie
    }
}

impl Pattern for OneOf {
    fn scan<'a>(&self, cursor: &mut Cursor<'a>) -> PatternResult<'a> {
        let start = cursor.pos();
        let mut node = Trie::ROOT;
        // Chars pulled through `next()`, including the one without an edge.
        let mut consumed = 0usize;
        // (chars consumed, end offset) of the longest word seen so far.
        let mut best: Option<(usize, usize)> = None;

        while let Some(ch) = cursor.next() {
            consumed += 1;
            let Some(next) = self.trie.child(node, ch) else {
                break;
            };
            node = next;
            if self.trie.is_terminal(node) {
                best = Some((consumed, cursor.pos()));
            }
        }

        let keep = best.map_or(0, |(chars, _)| chars);
        for _ in keep..consumed {
            cursor.back();
        }
        Ok(best.map(|(_, end)| cursor.slice(start, end)))
    }
}

// === Character set ===

/// One char out of a set. Built by [`char_set`].
#[derive(Clone, Debug)]
pub struct CharClass {
    set: CharSet,
}

/// Match exactly one char that is a member of `set`.
pub fn char_set(set: CharSet) -> CharClass {
    CharClass { set }
}

impl Pattern for CharClass {
    fn scan<'a>(&self, cursor: &mut Cursor<'a>) -> PatternResult<'a> {
        let start = cursor.pos();
        match cursor.next() {
            Some(ch) if self.set.contains(ch) => Ok(Some(cursor.slice_from(start))),
            _ => miss(cursor, start),
        }
    }
}

/// One or more chars out of a set. Built by [`repeat`].
#[derive(Clone, Debug)]
pub struct Repeat {
    set: CharSet,
}

/// Match the longest non-empty run of chars from `set`.
pub fn repeat(set: CharSet) -> Repeat {
    Repeat { set }
}

impl Pattern for Repeat {
    fn scan<'a>(&self, cursor: &mut Cursor<'a>) -> PatternResult<'a> {
        let start = cursor.pos();
        if cursor.eat_while(|ch| self.set.contains(ch)) == 0 {
            return Ok(None);
        }
        Ok(Some(cursor.slice_from(start)))
    }
}

/// A leading char followed by continuation chars. Built by [`identifier`].
#[derive(Clone, Debug)]
pub struct Identifier {
    start: CharSet,
    rest: CharSet,
}

/// Match one char from `start`, then as many chars from `rest` as follow.
pub fn identifier(start: CharSet, rest: CharSet) -> Identifier {
    Identifier { start, rest }
}

impl Pattern for Identifier {
    fn scan<'a>(&self, cursor: &mut Cursor<'a>) -> PatternResult<'a> {
        let start = cursor.pos();
        match cursor.next() {
            Some(ch) if self.start.contains(ch) => {
                cursor.eat_while(|ch| self.rest.contains(ch));
                Ok(Some(cursor.slice_from(start)))
            }
            _ => miss(cursor, start),
        }
    }
}

// === Line comment ===

/// Prefix followed by the rest of the line. Built by [`line_comment`].
#[derive(Clone, Debug)]
pub struct LineComment {
    prefix: Exact,
}

/// Match `prefix` and everything after it up to (not including) the next
/// newline or end of input.
pub fn line_comment(prefix: impl Into<String>) -> LineComment {
    LineComment {
        prefix: exact(prefix),
    }
}

impl Pattern for LineComment {
    fn scan<'a>(&self, cursor: &mut Cursor<'a>) -> PatternResult<'a> {
        let start = cursor.pos();
        if self.prefix.scan(cursor)?.is_none() {
            return Ok(None);
        }
        cursor.eat_until_newline();
        Ok(Some(cursor.slice_from(start)))
    }
}

// === Quoted string literal ===

/// Single- or double-quoted literal on one line. Built by [`string_literal`].
#[derive(Clone, Copy, Debug, Default)]
pub struct StringLiteral;

/// Match a `'...'` or `"..."` literal.
///
/// The opening quote picks the closing quote. A backslash escapes the next
/// char, whatever it is; escapes are kept verbatim in the lexeme. A raw
/// newline is an error ([`ScanErrorKind::MultilineString`]), and so is end of
/// input before the closing quote ([`ScanErrorKind::UnterminatedString`]).
pub fn string_literal() -> StringLiteral {
    StringLiteral
}

impl Pattern for StringLiteral {
    fn scan<'a>(&self, cursor: &mut Cursor<'a>) -> PatternResult<'a> {
        let start = cursor.pos();
        let quote = match cursor.next() {
            Some(quote @ ('\'' | '"')) => quote,
            _ => return miss(cursor, start),
        };

        let mut escaped = false;
        loop {
            let at = cursor.pos();
            match cursor.next() {
                None => {
                    return Err(ScanError::new(ScanErrorKind::UnterminatedString, at, 1));
                }
                Some(_) if escaped => escaped = false,
                Some('\\') => escaped = true,
                Some('\n') => {
                    return Err(ScanError::new(ScanErrorKind::MultilineString, at, 1));
                }
                Some(ch) if ch == quote => return Ok(Some(cursor.slice_from(start))),
                Some(_) => {}
            }
        }
    }
}

// === Numeric literal ===

/// Digits with an optional fractional part. Built by [`number`].
#[derive(Clone, Copy, Debug)]
pub struct Number {
    decimal: bool,
}

/// Match one or more ASCII digits.
///
/// With `decimal`, a single `.` followed by at least one digit extends the
/// match. A second `.` ends it, as does a `.` with no digit after it.
pub fn number(decimal: bool) -> Number {
    Number { decimal }
}

impl Pattern for Number {
    fn scan<'a>(&self, cursor: &mut Cursor<'a>) -> PatternResult<'a> {
        let start = cursor.pos();
        if cursor.eat_while(|ch| ch.is_ascii_digit()) == 0 {
            return Ok(None);
        }
        if self.decimal && cursor.peek() == Some('.') {
            cursor.next();
            if cursor.eat_while(|ch| ch.is_ascii_digit()) == 0 {
                cursor.back();
            }
        }
        Ok(Some(cursor.slice_from(start)))
    }
}
