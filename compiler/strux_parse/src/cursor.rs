//! Token cursor for navigating the token stream.

use strux_ir::Span;
use strux_lexer::{Token, TokenKind};

use crate::ParseError;

/// Position in a token list ending with `Eof`.
pub struct Cursor<'a> {
    source: &'a str,
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the first token.
    pub fn new(source: &'a str, tokens: &'a [Token]) -> Self {
        Cursor {
            source,
            tokens,
            pos: 0,
        }
    }

    /// Current token; sticks at `Eof`.
    pub fn current(&self) -> &'a Token {
        self.peek(0)
    }

    /// Token `n` positions ahead; `Eof` past the end.
    pub fn peek(&self, n: usize) -> &'a Token {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[(self.pos + n).min(last)]
    }

    /// Current token kind.
    #[inline]
    pub fn current_kind(&self) -> &'a TokenKind {
        &self.current().kind
    }

    /// Current byte offset (start of the current token).
    #[inline]
    pub fn position(&self) -> u32 {
        self.current().span.start
    }

    /// Consume the current token and return it.
    pub fn advance(&mut self) -> &'a Token {
        let token = self.current();
        if !matches!(token.kind, TokenKind::Eof) {
            self.pos += 1;
        }
        token
    }

    /// Check the current token kind (payload ignored).
    pub fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.current_kind()) == std::mem::discriminant(kind)
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of the given kind or fail.
    pub fn expect(&mut self, kind: &TokenKind) -> Result<&'a Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error(kind.display_name()))
        }
    }

    /// Source text under a span.
    pub fn slice(&self, span: Span) -> &'a str {
        self.source
            .get(span.start as usize..span.end as usize)
            .unwrap_or_default()
    }

    /// Error at the current token.
    pub fn error(&self, expected: &str) -> ParseError {
        let token = self.current();
        let found = match &token.kind {
            TokenKind::Eof => token.kind.display_name().to_string(),
            kind => format!("{} `{}`", kind.display_name(), self.slice(token.span)),
        };
        ParseError::new(token.span, expected, found)
    }
}
