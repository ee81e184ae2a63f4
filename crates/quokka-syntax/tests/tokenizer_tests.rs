//! Integration tests for the CSS tokenizer.

use quokka_syntax::{CssToken, CssTokenizer, NumericType};

/// Tokenize and drop the trailing EOF token for easier assertions.
fn tokens(input: &str) -> Vec<CssToken> {
    let mut all = CssTokenizer::tokenize(input);
    assert_eq!(all.pop(), Some(CssToken::Eof));
    all
}

#[test]
fn test_ident() {
    assert_eq!(tokens("red"), vec![CssToken::ident("red")]);
}

#[test]
fn test_custom_property_ident() {
    // `--foo` is an ident sequence starting with two hyphens
    assert_eq!(tokens("--main-color"), vec![CssToken::ident("--main-color")]);
}

#[test]
fn test_integer() {
    assert_eq!(tokens("42"), vec![CssToken::integer(42)]);
}

#[test]
fn test_signed_integer() {
    assert_eq!(tokens("-7"), vec![CssToken::integer(-7)]);
    assert_eq!(tokens("+3"), vec![CssToken::integer(3)]);
}

#[test]
fn test_number_with_fraction() {
    match &tokens(".5")[..] {
        [CssToken::Number {
            value,
            int_value,
            numeric_type,
        }] => {
            assert!((value - 0.5).abs() < f64::EPSILON);
            assert_eq!(*int_value, None);
            assert_eq!(*numeric_type, NumericType::Number);
        }
        other => panic!("expected number token, got {other:?}"),
    }
}

#[test]
fn test_scientific_notation() {
    match &tokens("1e2")[..] {
        [CssToken::Number { value, .. }] => assert!((value - 100.0).abs() < f64::EPSILON),
        other => panic!("expected number token, got {other:?}"),
    }
}

#[test]
fn test_dimension() {
    assert_eq!(tokens("12px"), vec![CssToken::dimension(12.0, Some(12), "px")]);
}

#[test]
fn test_percentage() {
    assert_eq!(tokens("50%"), vec![CssToken::percentage(50.0, Some(50))]);
}

#[test]
fn test_hash() {
    match &tokens("#fff")[..] {
        [CssToken::Hash { value, .. }] => assert_eq!(value, "fff"),
        other => panic!("expected hash token, got {other:?}"),
    }
}

#[test]
fn test_string_double_and_single_quotes() {
    assert_eq!(tokens("\"hello\""), vec![CssToken::string("hello")]);
    assert_eq!(tokens("'hello'"), vec![CssToken::string("hello")]);
}

#[test]
fn test_string_with_escape() {
    assert_eq!(tokens(r#""a\"b""#), vec![CssToken::string("a\"b")]);
}

#[test]
fn test_unquoted_url() {
    assert_eq!(
        tokens("url(image.png)"),
        vec![CssToken::Url("image.png".to_string())]
    );
}

#[test]
fn test_quoted_url_is_function() {
    assert_eq!(
        tokens("url(\"image.png\")"),
        vec![
            CssToken::function("url"),
            CssToken::string("image.png"),
            CssToken::RightParen,
        ]
    );
}

#[test]
fn test_bad_url() {
    assert_eq!(tokens("url(a b)"), vec![CssToken::BadUrl]);
}

#[test]
fn test_function_token() {
    assert_eq!(
        tokens("calc(100%)"),
        vec![
            CssToken::function("calc"),
            CssToken::percentage(100.0, Some(100)),
            CssToken::RightParen,
        ]
    );
}

#[test]
fn test_at_keyword() {
    assert_eq!(tokens("@media"), vec![CssToken::AtKeyword("media".to_string())]);
}

#[test]
fn test_comments_are_skipped() {
    assert_eq!(
        tokens("red/* comment */blue"),
        vec![CssToken::ident("red"), CssToken::ident("blue")]
    );
}

#[test]
fn test_whitespace_collapses_to_one_token() {
    assert_eq!(
        tokens("a  \t\n b"),
        vec![
            CssToken::ident("a"),
            CssToken::Whitespace,
            CssToken::ident("b"),
        ]
    );
}

#[test]
fn test_declaration_shape() {
    assert_eq!(
        tokens("color:red;"),
        vec![
            CssToken::ident("color"),
            CssToken::Colon,
            CssToken::ident("red"),
            CssToken::Semicolon,
        ]
    );
}
