//! The tokenizer driver.
//!
//! At each position the rules are tried in table order:
//!
//! 1. snapshot the cursor position `p` and run the rule's pattern;
//! 2. on a match, the rule wins: its name is resolved, and either a token
//!    spanning `p..cursor` is emitted or (for an empty name) the text is
//!    dropped. Scanning resumes after the match;
//! 3. on no match, the cursor goes back to `p` and the next rule is tried;
//! 4. if no rule matches, tokenizing fails on the character at `p`.
//!
//! Once the input is exhausted an end-of-input token is appended. A pattern
//! error (an unterminated string, say) aborts the scan immediately. There is
//! no recovery: the caller gets either every token or one error.

use std::borrow::Cow;

use lexrule_core::{Cursor, Pattern};
use tracing::{debug, trace};

use crate::rule::{MatchContext, Rule};
use crate::token::{Token, EOF_NAME};
use crate::{TokenizeError, TokenizeErrorKind};

/// Ordered rule table plus the end-of-input token name.
///
/// Scan state lives on the stack of each [`tokenize`](Self::tokenize) call,
/// so one tokenizer can serve any number of calls, from any number of
/// threads.
#[derive(Debug)]
pub struct Tokenizer {
    rules: Vec<Rule>,
    eof_name: &'static str,
}

/// Thread-safety assertion: one rule table serves concurrent `tokenize` calls.
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Tokenizer>();
};

impl Tokenizer {
    /// Tokenizer over `rules`, tried in order.
    pub fn new(rules: Vec<Rule>) -> Self {
        Tokenizer {
            rules,
            eof_name: EOF_NAME,
        }
    }

    /// Start an empty [`TokenizerBuilder`].
    pub fn builder() -> TokenizerBuilder {
        TokenizerBuilder::default()
    }

    /// The rule table, in priority order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Name given to the end-of-input token.
    pub fn eof_name(&self) -> &'static str {
        self.eof_name
    }

    /// Split `source` into tokens.
    ///
    /// On success the last token is always the end-of-input token, whose
    /// `start` and `end` are `source.len()`, whose value is its name, whose
    /// column is 0 and whose line is the number of lines the scan saw.
    #[tracing::instrument(level = "debug", skip_all, fields(len = source.len(), rules = self.rules.len()))]
    pub fn tokenize<'src>(&self, source: &'src str) -> Result<Vec<Token<'src>>, TokenizeError> {
        let mut cursor = Cursor::new(source);
        let mut tokens = Vec::new();

        'scan: while !cursor.is_eof() {
            let start = cursor.pos();

            for rule in &self.rules {
                let lexeme = match rule.pattern.scan(&mut cursor) {
                    Ok(Some(lexeme)) if !lexeme.is_empty() && cursor.pos() > start => lexeme,
                    Ok(_) => {
                        cursor.restore(start);
                        continue;
                    }
                    Err(err) => {
                        let err = TokenizeError::from_scan(err, &cursor);
                        debug!(%err, "tokenize failed");
                        return Err(err);
                    }
                };

                let end = cursor.pos();
                let context = MatchContext {
                    source,
                    start,
                    end,
                    tokens: &tokens,
                };
                match rule.name.resolve(lexeme, &context) {
                    Some(name) => {
                        let position = cursor.position(start);
                        trace!(%name, lexeme, start, end, "token");
                        tokens.push(Token {
                            name,
                            value: lexeme,
                            start,
                            end,
                            line: position.line,
                            column: position.column,
                        });
                    }
                    None => trace!(lexeme, start, end, "discarded"),
                }
                continue 'scan;
            }

            let err = unexpected_character(&cursor, start);
            debug!(%err, "tokenize failed");
            return Err(err);
        }

        let line = u32::try_from(cursor.line_starts().line_count()).unwrap_or(u32::MAX);
        tokens.push(Token::eof(self.eof_name, source, line));
        debug!(tokens = tokens.len(), "tokenized");
        Ok(tokens)
    }
}

/// No rule matched at `start`: point at the one character found there.
fn unexpected_character(cursor: &Cursor<'_>, start: usize) -> TokenizeError {
    let found = cursor.source()[start..].chars().next().unwrap_or_default();
    TokenizeError::new(
        TokenizeErrorKind::UnexpectedCharacter,
        format!("unexpected character `{}`", found.escape_debug()),
        cursor.source(),
        start,
        1,
        cursor.position(start),
    )
}

/// Incremental construction of a [`Tokenizer`].
///
/// ```
/// use lexrule::{patterns, Tokenizer};
///
/// let tokenizer = Tokenizer::builder()
///     .rule("digit", patterns::number(false))
///     .eof_name("end")
///     .build();
/// let tokens = tokenizer.tokenize("42").unwrap();
/// assert_eq!(tokens.last().map(|t| t.value), Some("end"));
/// ```
#[derive(Debug)]
pub struct TokenizerBuilder {
    rules: Vec<Rule>,
    eof_name: &'static str,
}

impl Default for TokenizerBuilder {
    fn default() -> Self {
        TokenizerBuilder {
            rules: Vec::new(),
            eof_name: EOF_NAME,
        }
    }
}

impl TokenizerBuilder {
    /// Append a rule emitting `name`.
    #[must_use]
    pub fn rule(self, name: impl Into<Cow<'static, str>>, pattern: impl Pattern + 'static) -> Self {
        self.push(Rule::new(name, pattern))
    }

    /// Append a rule whose matches are dropped.
    #[must_use]
    pub fn skip(self, pattern: impl Pattern + 'static) -> Self {
        self.push(Rule::skip(pattern))
    }

    /// Append a rule whose names are computed by `namer`.
    #[must_use]
    pub fn rule_with<F>(self, namer: F, pattern: impl Pattern + 'static) -> Self
    where
        F: Fn(&str, &MatchContext<'_, '_>) -> Option<Cow<'static, str>> + Send + Sync + 'static,
    {
        self.push(Rule::with_namer(namer, pattern))
    }

    /// Append an already-built rule.
    #[must_use]
    pub fn push(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Name (and value) of the end-of-input token. Defaults to `"eof"`.
    #[must_use]
    pub fn eof_name(mut self, name: &'static str) -> Self {
        self.eof_name = name;
        self
    }

    pub fn build(self) -> Tokenizer {
        Tokenizer {
            rules: self.rules,
            eof_name: self.eof_name,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;
