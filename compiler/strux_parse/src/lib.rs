//! Recursive descent parser for Strux expressions.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! expression  := alternative ( ('?' | ':') alternative )*
//! alternative := '!' alternative | operand
//! operand     := string | number | lterm ( '.' rterm )*
//! lterm       := '(' expression ')' | ident args? | '$' lterm
//! rterm       := '(' expression ')' | ident args? | string | integer | '$' lterm
//! args        := '(' ( expression ( ',' expression )* )? ')'
//! ```
//!
//! The whole input must be one expression; anything left over is an error.

mod cursor;
mod error;
mod grammar;

pub use cursor::Cursor;
pub use error::ParseError;

use strux_ir::Expr;
use strux_lexer::TokenKind;
use tracing::trace;

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    /// Create a parser over already-lexed tokens.
    pub fn new(source: &'a str, tokens: &'a [strux_lexer::Token]) -> Self {
        Parser {
            cursor: Cursor::new(source, tokens),
        }
    }
}

/// Parse expression text into a tree.
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    trace!(source, "parse");
    let tokens = strux_lexer::lex(source);
    let mut parser = Parser::new(source, &tokens);
    let expr = parser.parse_expression()?;
    if !parser.cursor.check(&TokenKind::Eof) {
        return Err(parser.cursor.error("end of expression"));
    }
    Ok(expr)
}
