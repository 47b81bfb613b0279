use pretty_assertions::assert_eq;

use super::*;

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source).tokens.into_iter().map(|t| t.kind).collect()
}

#[test]
fn test_lex_let_statement() {
    assert_eq!(
        kinds("let x = 42;"),
        vec![
            TokenKind::Let,
            TokenKind::Ident("x".to_string()),
            TokenKind::Eq,
            TokenKind::Int(42),
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_function_literal() {
    assert_eq!(
        kinds("fn(a, b) { a + b }"),
        vec![
            TokenKind::Fn,
            TokenKind::LParen,
            TokenKind::Ident("a".to_string()),
            TokenKind::Comma,
            TokenKind::Ident("b".to_string()),
            TokenKind::RParen,
            TokenKind::LBrace,
            TokenKind::Ident("a".to_string()),
            TokenKind::Plus,
            TokenKind::Ident("b".to_string()),
            TokenKind::RBrace,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_multi_char_operators() {
    assert_eq!(
        kinds("** << >> <= >= == != && || ! ~ ^ % &"),
        vec![
            TokenKind::StarStar,
            TokenKind::Shl,
            TokenKind::Shr,
            TokenKind::LtEq,
            TokenKind::GtEq,
            TokenKind::EqEq,
            TokenKind::NotEq,
            TokenKind::AmpAmp,
            TokenKind::PipePipe,
            TokenKind::Bang,
            TokenKind::Tilde,
            TokenKind::Caret,
            TokenKind::Percent,
            TokenKind::Amp,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_literals() {
    assert_eq!(
        kinds(r#"3.25 "a\tb" true null"#),
        vec![
            TokenKind::Decimal(3.25),
            TokenKind::Str("a\tb".to_string()),
            TokenKind::True,
            TokenKind::Null,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_comments_skipped() {
    assert_eq!(
        kinds("1 // one\n// whole line\n2"),
        vec![TokenKind::Int(1), TokenKind::Int(2), TokenKind::Eof]
    );
}

#[test]
fn test_spans() {
    let out = lex("let abc");
    assert_eq!(out.tokens[0].span, Span::new(0, 3));
    assert_eq!(out.tokens[1].span, Span::new(4, 7));
    assert_eq!(out.tokens[2].span, Span::point(7));
}

#[test]
fn test_invalid_token_recovers() {
    let out = lex("1 @ 2");
    assert_eq!(
        out.tokens.iter().map(|t| t.kind.clone()).collect::<Vec<_>>(),
        vec![TokenKind::Int(1), TokenKind::Error, TokenKind::Int(2), TokenKind::Eof]
    );
    assert_eq!(out.errors.len(), 1);
    assert_eq!(out.errors[0].span, Span::new(2, 3));
    assert_eq!(out.errors[0].code(), tern_diagnostic::ErrorCode::E0001);
}

#[test]
fn test_unterminated_string() {
    let out = lex("let s = \"abc\nputs(s);");
    assert_eq!(out.errors.len(), 1);
    assert_eq!(out.errors[0].kind, LexErrorKind::UnterminatedString);
    assert_eq!(out.errors[0].span, Span::new(8, 12));
}

#[test]
fn test_integer_overflow() {
    let out = lex("99999999999999999999");
    assert!(out.has_errors());
    assert_eq!(
        out.errors[0].kind,
        LexErrorKind::IntOverflow("99999999999999999999".to_string())
    );
    assert_eq!(out.errors[0].to_diagnostic().code, tern_diagnostic::ErrorCode::E0003);
}
