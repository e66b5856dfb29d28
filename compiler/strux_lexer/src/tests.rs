use super::*;
use pretty_assertions::assert_eq;

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source).into_iter().map(|t| t.kind).collect()
}

#[test]
fn test_lex_dotted_term() {
    assert_eq!(
        kinds("user.name"),
        vec![
            TokenKind::Ident("user".into()),
            TokenKind::Dot,
            TokenKind::Ident("name".into()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_signed_integers() {
    assert_eq!(
        kinds("list.-1 +7"),
        vec![
            TokenKind::Ident("list".into()),
            TokenKind::Dot,
            TokenKind::Int(-1),
            TokenKind::Int(7),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_float_is_three_tokens() {
    assert_eq!(
        kinds("1.5"),
        vec![TokenKind::Int(1), TokenKind::Dot, TokenKind::Int(5), TokenKind::Eof]
    );
}

#[test]
fn test_integer_beyond_i64_is_its_own_token() {
    assert_eq!(
        kinds("99999999999999999999 9223372036854775807"),
        vec![
            TokenKind::IntOverflow,
            TokenKind::Int(i64::MAX),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_string_delimiters() {
    assert_eq!(
        kinds(r#""a'b" 'c"d' `e`"#),
        vec![
            TokenKind::Str("a'b".into()),
            TokenKind::Str("c\"d".into()),
            TokenKind::Str("e".into()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_operators() {
    assert_eq!(
        kinds("!a ? $b : f(c, d)"),
        vec![
            TokenKind::Bang,
            TokenKind::Ident("a".into()),
            TokenKind::Question,
            TokenKind::Dollar,
            TokenKind::Ident("b".into()),
            TokenKind::Colon,
            TokenKind::Ident("f".into()),
            TokenKind::LParen,
            TokenKind::Ident("c".into()),
            TokenKind::Comma,
            TokenKind::Ident("d".into()),
            TokenKind::RParen,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_spans_track_bytes() {
    let tokens = lex("ab . cd");
    assert_eq!(tokens[0].span, Span::new(0, 2));
    assert_eq!(tokens[1].span, Span::new(3, 4));
    assert_eq!(tokens[2].span, Span::new(5, 7));
    assert_eq!(tokens[3].span, Span::new(7, 7));
}

#[test]
fn test_invalid_input_is_error_token() {
    let tokens = kinds("a + b");
    assert!(tokens.contains(&TokenKind::Error));
}

#[test]
fn test_unterminated_string() {
    assert_eq!(kinds("\"abc")[0], TokenKind::Error);
}

#[test]
fn test_empty_source() {
    assert_eq!(kinds("   "), vec![TokenKind::Eof]);
}
