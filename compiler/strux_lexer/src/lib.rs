//! Lexer for Strux expressions using logos.
//!
//! The token set is tiny: identifiers, integers, three flavours of quoted
//! string, and eight punctuation marks. Floats are not tokens. `list.0.1` must
//! stay two integer selectors, so the parser joins `Int '.' Int` into a float
//! only where a number literal is allowed.
//!
//! Unrecognised input becomes [`TokenKind::Error`]; the parser turns it into
//! a grammar error with the offending span.

use std::fmt;

use logos::Logos;
use strux_ir::Span;

/// Raw token from logos.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
enum RawToken {
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    // Sign belongs to the literal; the grammar has no arithmetic.
    #[regex(r"[+-]?[0-9]+")]
    Int,

    // Delimiter-exclusive strings, no escapes.
    #[regex(r#""[^"]*""#)]
    #[regex(r"'[^']*'")]
    #[regex(r"`[^`]*`")]
    Str,

    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("$")]
    Dollar,
    #[token("!")]
    Bang,
    #[token("?")]
    Question,
    #[token(":")]
    Colon,
}

/// Token kind.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Ident(String),
    Int(i64),
    /// Integer digits outside the `i64` range.
    IntOverflow,
    /// String contents without delimiters.
    Str(String),
    Dot,
    Comma,
    LParen,
    RParen,
    Dollar,
    Bang,
    Question,
    Colon,
    /// Unrecognised input.
    Error,
    Eof,
}

impl TokenKind {
    /// Human-readable name for diagnostics.
    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::Ident(_) => "identifier",
            TokenKind::Int(_) => "integer",
            TokenKind::IntOverflow => "out-of-range integer",
            TokenKind::Str(_) => "string",
            TokenKind::Dot => "`.`",
            TokenKind::Comma => "`,`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::Dollar => "`$`",
            TokenKind::Bang => "`!`",
            TokenKind::Question => "`?`",
            TokenKind::Colon => "`:`",
            TokenKind::Error => "invalid input",
            TokenKind::Eof => "end of expression",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A token with its location.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

/// Lex expression text into tokens, always terminated by `Eof`.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut logos = RawToken::lexer(source);

    while let Some(result) = logos.next() {
        let span = Span::from_range(logos.span());
        let slice = logos.slice();

        let kind = match result {
            Ok(RawToken::Ident) => TokenKind::Ident(slice.to_string()),
            Ok(RawToken::Int) => slice.parse().map_or(TokenKind::IntOverflow, TokenKind::Int),
            Ok(RawToken::Str) => TokenKind::Str(slice[1..slice.len() - 1].to_string()),
            Ok(RawToken::Dot) => TokenKind::Dot,
            Ok(RawToken::Comma) => TokenKind::Comma,
            Ok(RawToken::LParen) => TokenKind::LParen,
            Ok(RawToken::RParen) => TokenKind::RParen,
            Ok(RawToken::Dollar) => TokenKind::Dollar,
            Ok(RawToken::Bang) => TokenKind::Bang,
            Ok(RawToken::Question) => TokenKind::Question,
            Ok(RawToken::Colon) => TokenKind::Colon,
            Err(()) => TokenKind::Error,
        };
        tokens.push(Token::new(kind, span));
    }

    tokens.push(Token::new(TokenKind::Eof, Span::point(source.len())));
    tokens
}

#[cfg(test)]
mod tests;
