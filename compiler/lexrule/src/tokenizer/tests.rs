use std::borrow::Cow;
use std::sync::Arc;

use lexrule_core::{patterns, CharSet, Cursor};
use pretty_assertions::assert_eq;

use super::*;

/// Names and values, the common shape for assertions.
fn pairs<'a>(tokens: &'a [Token<'_>]) -> Vec<(&'a str, &'a str)> {
    tokens.iter().map(|t| (&*t.name, t.value)).collect()
}

fn calculator() -> Tokenizer {
    Tokenizer::builder()
        .skip(patterns::repeat(CharSet::whitespace()))
        .rule("number", patterns::number(true))
        .rule("op", patterns::one_of(["+", "-", "*", "/", "**", "(", ")"]))
        .build()
}

// --- End of input ---

#[test]
fn empty_input_yields_only_eof() {
    let tokens = calculator().tokenize("").unwrap();
    assert_eq!(
        tokens,
        vec![Token {
            name: Cow::Borrowed("eof"),
            value: "eof",
            start: 0,
            end: 0,
            line: 1,
            column: 0,
        }]
    );
    assert!(tokens[0].is_eof());
}

#[test]
fn eof_is_always_last_and_spans_nothing() {
    let source = "1 + 2";
    let tokens = calculator().tokenize(source).unwrap();
    let eof = tokens.last().unwrap();
    assert!(eof.is_eof());
    assert_eq!(eof.span(), source.len()..source.len());
    assert_eq!(eof.column, 0);
    assert_eq!(tokens.iter().filter(|t| t.is_eof()).count(), 1);
}

#[test]
fn eof_line_counts_recorded_lines() {
    let tokenizer = calculator();
    assert_eq!(tokenizer.tokenize("1\n2\n3").unwrap().last().unwrap().line, 3);
    assert_eq!(tokenizer.tokenize("1\n2\n").unwrap().last().unwrap().line, 3);
    assert_eq!(tokenizer.tokenize("1").unwrap().last().unwrap().line, 1);
}

#[test]
fn custom_eof_name_is_name_and_value() {
    let tokenizer = Tokenizer::builder()
        .rule("x", patterns::exact("x"))
        .eof_name("END")
        .build();
    let tokens = tokenizer.tokenize("xx").unwrap();
    assert_eq!(pairs(&tokens), [("x", "x"), ("x", "x"), ("END", "END")]);
    assert_eq!(tokenizer.eof_name(), "END");
}

// --- Rule priority ---

#[test]
fn first_matching_rule_wins() {
    let tokenizer = Tokenizer::builder()
        .rule("short", patterns::exact("="))
        .rule("long", patterns::exact("=="))
        .build();
    let tokens = tokenizer.tokenize("==").unwrap();
    assert_eq!(pairs(&tokens), [("short", "="), ("short", "="), ("eof", "eof")]);
}

#[test]
fn longest_match_lives_inside_one_of() {
    let tokenizer = Tokenizer::builder()
        .skip(patterns::repeat(CharSet::whitespace()))
        .rule("word", patterns::one_of(["a", "ab", "abc", "abd"]))
        .build();
    let tokens = tokenizer.tokenize("abc abd ab a").unwrap();
    assert_eq!(
        pairs(&tokens),
        [
            ("word", "abc"),
            ("word", "abd"),
            ("word", "ab"),
            ("word", "a"),
            ("eof", "eof"),
        ]
    );
}

#[test]
fn keyword_before_identifier() {
    let tokenizer = Tokenizer::builder()
        .skip(patterns::repeat(CharSet::whitespace()))
        .rule("let", patterns::exact("let"))
        .rule(
            "ident",
            patterns::identifier(CharSet::ascii_letters(), CharSet::ascii_letters()),
        )
        .build();
    let tokens = tokenizer.tokenize("let x").unwrap();
    assert_eq!(pairs(&tokens), [("let", "let"), ("ident", "x"), ("eof", "eof")]);
}

#[test]
fn number_stops_at_second_dot() {
    let tokenizer = Tokenizer::builder()
        .rule("number", patterns::number(true))
        .rule("dot", patterns::exact("."))
        .build();
    let tokens = tokenizer.tokenize("1.2.3").unwrap();
    assert_eq!(
        pairs(&tokens),
        [("number", "1.2"), ("dot", "."), ("number", "3"), ("eof", "eof")]
    );
}

// --- Positions ---

#[test]
fn tokens_carry_line_and_column() {
    let tokenizer = Tokenizer::builder()
        .skip(patterns::repeat(CharSet::whitespace()))
        .rule(
            "ident",
            patterns::identifier(CharSet::ascii_letters(), CharSet::ascii_letters()),
        )
        .rule("eq", patterns::exact("="))
        .build();
    let tokens = tokenizer.tokenize("foo\nbar\n=").unwrap();
    let positions: Vec<_> = tokens.iter().map(|t| (t.value, t.line, t.column)).collect();
    assert_eq!(
        positions,
        [("foo", 1, 1), ("bar", 2, 1), ("=", 3, 1), ("eof", 3, 0)]
    );
}

#[test]
fn columns_count_characters() {
    let tokenizer = Tokenizer::builder()
        .skip(patterns::repeat(CharSet::whitespace()))
        .rule("word", patterns::repeat(CharSet::new().with_range('a', 'z').with_chars("éü")))
        .build();
    let tokens = tokenizer.tokenize("éé ü").unwrap();
    assert_eq!(tokens[1].column, 4);
    assert_eq!(tokens[1].start, 5);
}

#[test]
fn long_single_line_columns() {
    let tokenizer = Tokenizer::builder()
        .skip(patterns::exact(" "))
        .rule("a", patterns::exact("a"))
        .build();
    let source = "a ".repeat(100_000);
    let tokens = tokenizer.tokenize(&source).unwrap();
    assert_eq!(tokens.len(), 100_001);
    let last = &tokens[tokens.len() - 2];
    assert_eq!((last.line, last.column), (1, 199_999));
    assert_eq!(tokens[50_000].column, 100_001);
}

#[test]
fn spans_slice_back_to_values() {
    let source = "(1 + 22) ** 3.5";
    let tokens = calculator().tokenize(source).unwrap();
    for token in tokens.iter().filter(|t| !t.is_eof()) {
        assert_eq!(&source[token.span()], token.value);
    }
}

// --- Naming ---

#[test]
fn skip_rules_emit_nothing() {
    let tokenizer = Tokenizer::builder()
        .skip(patterns::repeat(CharSet::whitespace()))
        .skip(patterns::line_comment("#"))
        .rule("number", patterns::number(false))
        .build();
    let tokens = tokenizer.tokenize("1 # one\n2").unwrap();
    assert_eq!(pairs(&tokens), [("number", "1"), ("number", "2"), ("eof", "eof")]);
}

#[test]
fn empty_fixed_name_discards() {
    let tokenizer = Tokenizer::builder()
        .rule("", patterns::exact(" "))
        .rule("x", patterns::exact("x"))
        .build();
    let tokens = tokenizer.tokenize("x x").unwrap();
    assert_eq!(pairs(&tokens), [("x", "x"), ("x", "x"), ("eof", "eof")]);
}

#[test]
fn dynamic_name_sees_lexeme() {
    let tokenizer = Tokenizer::builder()
        .skip(patterns::repeat(CharSet::whitespace()))
        .rule_with(
            |lexeme, _| {
                let name = if lexeme.len() > 2 { "long" } else { "short" };
                Some(Cow::Borrowed(name))
            },
            patterns::repeat(CharSet::ascii_letters()),
        )
        .build();
    let tokens = tokenizer.tokenize("ab abc").unwrap();
    assert_eq!(pairs(&tokens), [("short", "ab"), ("long", "abc"), ("eof", "eof")]);
}

#[test]
fn dynamic_name_sees_previous_token() {
    // `type` is only a keyword right after `.`
    let tokenizer = Tokenizer::builder()
        .rule("dot", patterns::exact("."))
        .rule_with(
            |lexeme, context| {
                let after_dot = context.previous().is_some_and(|t| t.is("dot"));
                let name = if lexeme == "type" && after_dot { "type_kw" } else { "ident" };
                Some(Cow::Borrowed(name))
            },
            patterns::repeat(CharSet::ascii_letters()),
        )
        .build();
    let tokens = tokenizer.tokenize("type.type").unwrap();
    assert_eq!(
        pairs(&tokens),
        [("ident", "type"), ("dot", "."), ("type_kw", "type"), ("eof", "eof")]
    );
}

#[test]
fn dynamic_name_sees_match_offsets() {
    let tokenizer = Tokenizer::builder()
        .rule_with(
            |_, context| {
                assert_eq!(&context.source()[context.start()..context.end()], "ab");
                assert!(context.tokens().is_empty());
                Some(Cow::Owned(format!("at{}", context.start())))
            },
            patterns::exact("ab"),
        )
        .build();
    let tokens = tokenizer.tokenize("ab").unwrap();
    assert_eq!(tokens[0].name, "at0");
}

#[test]
fn dynamic_none_discards() {
    let tokenizer = Tokenizer::builder()
        .rule_with(
            |lexeme, _| (lexeme != " ").then_some(Cow::Borrowed("char")),
            patterns::char_set(CharSet::from_chars("ab ")),
        )
        .build();
    let tokens = tokenizer.tokenize("a b").unwrap();
    assert_eq!(pairs(&tokens), [("char", "a"), ("char", "b"), ("eof", "eof")]);
}

// --- Misses ---

#[test]
fn non_advancing_match_is_a_miss() {
    let empty = patterns::from_fn(|cursor: &mut Cursor<'_>| Ok(Some(cursor.slice_from(cursor.pos()))));
    let tokenizer = Tokenizer::builder()
        .rule("empty", empty)
        .rule("x", patterns::exact("x"))
        .build();
    let tokens = tokenizer.tokenize("x").unwrap();
    assert_eq!(pairs(&tokens), [("x", "x"), ("eof", "eof")]);
}

#[test]
fn partial_progress_is_rewound() {
    // Consumes two chars, then gives up without restoring.
    let sloppy = patterns::from_fn(|cursor: &mut Cursor<'_>| {
        cursor.next();
        cursor.next();
        Ok(None)
    });
    let tokenizer = Tokenizer::builder()
        .rule("sloppy", sloppy)
        .rule("char", patterns::char_set(CharSet::ascii_letters()))
        .build();
    let tokens = tokenizer.tokenize("abc").unwrap();
    assert_eq!(
        pairs(&tokens),
        [("char", "a"), ("char", "b"), ("char", "c"), ("eof", "eof")]
    );
}

// --- Errors ---

#[test]
fn unexpected_character_reports_position() {
    let err = calculator().tokenize("1 +\n2 $ 3").unwrap_err();
    assert_eq!(err.kind(), TokenizeErrorKind::UnexpectedCharacter);
    assert_eq!(err.message(), "unexpected character `$`");
    assert_eq!((err.line(), err.column()), (2, 3));
    assert_eq!(err.start(), 6);
    assert_eq!(err.len(), 1);
    assert_eq!(err.to_string(), "unexpected character `$` at 2:3.");
}

#[test]
fn unexpected_control_character_is_escaped() {
    let err = calculator().tokenize("1\t\u{7}").unwrap_err();
    assert_eq!(err.message(), "unexpected character `\\u{7}`");
}

#[test]
fn no_rules_fails_on_first_character() {
    let err = Tokenizer::new(Vec::new()).tokenize("a").unwrap_err();
    assert_eq!(err.to_string(), "unexpected character `a` at 1:1.");
}

#[test]
fn unexpected_character_format() {
    let err = calculator().tokenize("1 +\n2 $ 3").unwrap_err();
    let expected = [
        "error: unexpected character `$` at 2:3.",
        "--> line:2:3",
        "  |",
        "2 | 2 $ 3",
        "  |   ^ unexpected character `$`",
    ]
    .join("\n");
    assert_eq!(err.format(), expected);
}

fn strings() -> Tokenizer {
    Tokenizer::builder()
        .skip(patterns::repeat(CharSet::whitespace()))
        .rule("string", patterns::string_literal())
        .build()
}

#[test]
fn strings_keep_quotes_and_escapes() {
    let tokens = strings().tokenize(r#"'a\'b' "c\"d""#).unwrap();
    assert_eq!(
        pairs(&tokens),
        [("string", r"'a\'b'"), ("string", r#""c\"d""#), ("eof", "eof")]
    );
}

#[test]
fn unterminated_string_aborts() {
    let err = strings().tokenize("'ok'\n  \"open").unwrap_err();
    assert_eq!(err.kind(), TokenizeErrorKind::UnterminatedString);
    assert_eq!(err.start(), 12);
    assert_eq!(err.to_string(), "unterminated string literal at 2:8.");
}

#[test]
fn newline_in_string_aborts() {
    let err = strings().tokenize("\"ab\ncd\"").unwrap_err();
    assert_eq!(err.kind(), TokenizeErrorKind::MultilineString);
    assert_eq!(err.start(), 3);
    assert_eq!((err.line(), err.column()), (1, 4));
}

// --- Reuse ---

#[test]
fn tokenizer_is_reusable() {
    let tokenizer = calculator();
    let first = tokenizer.tokenize("1\n2").unwrap();
    let second = tokenizer.tokenize("3").unwrap();
    assert_eq!(first.last().unwrap().line, 2);
    assert_eq!(second.last().unwrap().line, 1);
    assert_eq!(second[0].line, 1);
}

#[test]
fn tokenizer_is_shared_across_threads() {
    let tokenizer = Arc::new(calculator());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let tokenizer = Arc::clone(&tokenizer);
            std::thread::spawn(move || {
                let source = format!("{i} + {i}");
                tokenizer.tokenize(&source).unwrap().len()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 4);
    }
}

#[test]
fn rules_are_kept_in_order() {
    let tokenizer = calculator();
    let names: Vec<_> = tokenizer.rules().iter().map(|r| format!("{:?}", r.name())).collect();
    assert_eq!(names, ["Skip", "Fixed(\"number\")", "Fixed(\"op\")"]);
}
