//! Rules: a pattern paired with the name its matches get.

use std::borrow::Cow;
use std::fmt;

use lexrule_core::Pattern;

use crate::Token;

/// What the tokenizer knows when a rule matches.
///
/// Passed to dynamic rule names so they can look at the surrounding text or
/// at the tokens emitted so far (contextual keywords, for example).
#[derive(Clone, Copy, Debug)]
pub struct MatchContext<'t, 'src> {
    pub(crate) source: &'src str,
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) tokens: &'t [Token<'src>],
}

impl<'t, 'src> MatchContext<'t, 'src> {
    /// The full source text.
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Byte offset where the match starts.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Byte offset right after the match.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Tokens emitted before this match.
    pub fn tokens(&self) -> &'t [Token<'src>] {
        self.tokens
    }

    /// The most recently emitted token.
    pub fn previous(&self) -> Option<&'t Token<'src>> {
        self.tokens.last()
    }
}

/// Signature of a computed rule name.
///
/// Returning `None` or an empty name discards the match.
pub type Namer = dyn Fn(&str, &MatchContext<'_, '_>) -> Option<Cow<'static, str>> + Send + Sync;

/// How a rule names its matches.
pub enum RuleName {
    /// Every match gets this name. An empty name discards matches.
    Fixed(Cow<'static, str>),
    /// Matches are consumed and dropped.
    Skip,
    /// The name is computed from the lexeme and the match context.
    Dynamic(Box<Namer>),
}

impl RuleName {
    /// Name for `lexeme`, or `None` if the match is discarded.
    pub fn resolve(&self, lexeme: &str, context: &MatchContext<'_, '_>) -> Option<Cow<'static, str>> {
        let name = match self {
            RuleName::Fixed(name) => name.clone(),
            RuleName::Skip => return None,
            RuleName::Dynamic(namer) => namer(lexeme, context)?,
        };
        (!name.is_empty()).then_some(name)
    }
}

impl fmt::Debug for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleName::Fixed(name) => f.debug_tuple("Fixed").field(name).finish(),
            RuleName::Skip => f.write_str("Skip"),
            RuleName::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// A pattern and the name its matches are emitted under.
pub struct Rule {
    pub(crate) name: RuleName,
    pub(crate) pattern: Box<dyn Pattern>,
}

impl Rule {
    /// Emit matches of `pattern` as `name`.
    pub fn new(name: impl Into<Cow<'static, str>>, pattern: impl Pattern + 'static) -> Self {
        Rule {
            name: RuleName::Fixed(name.into()),
            pattern: Box::new(pattern),
        }
    }

    /// Consume matches of `pattern` without emitting tokens.
    pub fn skip(pattern: impl Pattern + 'static) -> Self {
        Rule {
            name: RuleName::Skip,
            pattern: Box::new(pattern),
        }
    }

    /// Name each match of `pattern` with `namer`.
    ///
    /// ```
    /// use std::borrow::Cow;
    /// use lexrule::{patterns, CharSet, Rule, Tokenizer};
    ///
    /// let word = patterns::repeat(CharSet::ascii_letters());
    /// let keywords = ["if", "else"];
    /// let tokenizer = Tokenizer::new(vec![
    ///     Rule::with_namer(
    ///         move |lexeme, _| {
    ///             Some(Cow::Borrowed(if keywords.contains(&lexeme) { "keyword" } else { "ident" }))
    ///         },
    ///         word,
    ///     ),
    ///     Rule::skip(patterns::char_set(CharSet::whitespace())),
    /// ]);
    ///
    /// let tokens = tokenizer.tokenize("if x").unwrap();
    /// assert_eq!(tokens[0].name, "keyword");
    /// assert_eq!(tokens[1].name, "ident");
    /// ```
    pub fn with_namer<F>(namer: F, pattern: impl Pattern + 'static) -> Self
    where
        F: Fn(&str, &MatchContext<'_, '_>) -> Option<Cow<'static, str>> + Send + Sync + 'static,
    {
        Rule {
            name: RuleName::Dynamic(Box::new(namer)),
            pattern: Box::new(pattern),
        }
    }

    /// How this rule names its matches.
    pub fn name(&self) -> &RuleName {
        &self.name
    }

    /// The rule's pattern.
    pub fn pattern(&self) -> &dyn Pattern {
        &*self.pattern
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
