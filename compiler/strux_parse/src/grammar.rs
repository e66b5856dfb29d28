//! Grammar productions.

use strux_ir::{BoolOp, Expr, Literal};
use strux_lexer::TokenKind;
use strux_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// `expression := alternative ( ('?' | ':') alternative )*`
    ///
    /// A chain without operators collapses to its single alternative.
    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| {
            let first = self.parse_alternative()?;
            let mut rest = Vec::new();
            loop {
                let op = match self.cursor.current_kind() {
                    TokenKind::Question => BoolOp::And,
                    TokenKind::Colon => BoolOp::Or,
                    _ => break,
                };
                self.cursor.advance();
                rest.push((op, self.parse_alternative()?));
            }
            if rest.is_empty() {
                Ok(first)
            } else {
                Ok(Expr::BoolChain {
                    first: Box::new(first),
                    rest,
                })
            }
        })
    }

    /// `alternative := '!' alternative | operand`
    fn parse_alternative(&mut self) -> Result<Expr, ParseError> {
        if self.cursor.eat(&TokenKind::Bang) {
            let operand = ensure_sufficient_stack(|| self.parse_alternative())?;
            return Ok(Expr::Not(Box::new(operand)));
        }
        self.parse_operand()
    }

    /// `operand := string | number | lterm ( '.' rterm )*`
    fn parse_operand(&mut self) -> Result<Expr, ParseError> {
        trace!(pos = self.cursor.position(), "parse_operand");
        let literal = match self.cursor.current_kind() {
            TokenKind::Str(s) => {
                self.cursor.advance();
                Some(Literal::Str(s.clone()))
            }
            TokenKind::Int(_) | TokenKind::IntOverflow => Some(self.parse_number()),
            _ => None,
        };
        if let Some(literal) = literal {
            if self.cursor.check(&TokenKind::Dot) {
                return Err(self.cursor.error("no selector after a literal"));
            }
            return Ok(Expr::Literal(literal));
        }

        let base = self.parse_lterm()?;
        if !self.cursor.check(&TokenKind::Dot) {
            return Ok(base);
        }
        let mut selectors = Vec::new();
        while self.cursor.eat(&TokenKind::Dot) {
            selectors.push(self.parse_rterm()?);
        }
        Ok(Expr::Dot {
            base: Box::new(base),
            selectors,
        })
    }

    /// Number literal. `Int '.' Int` with no gaps and an unsigned fraction is
    /// a float; everything else stays an integer. Integers beyond the `i64`
    /// range become floats.
    fn parse_number(&mut self) -> Literal {
        let number = self.cursor.peek(0);
        let whole = number.span;
        let dot = self.cursor.peek(1);
        let fraction = self.cursor.peek(2);
        let joined = matches!(dot.kind, TokenKind::Dot)
            && matches!(fraction.kind, TokenKind::Int(_) | TokenKind::IntOverflow)
            && whole.touches(dot.span)
            && dot.span.touches(fraction.span)
            && self
                .cursor
                .slice(fraction.span)
                .bytes()
                .all(|b| b.is_ascii_digit());

        if joined {
            let text = self.cursor.slice(whole.merge(fraction.span));
            if let Ok(f) = text.parse::<f64>() {
                self.cursor.advance();
                self.cursor.advance();
                self.cursor.advance();
                return Literal::Float(f);
            }
        }
        self.cursor.advance();
        match number.kind {
            TokenKind::Int(n) => Literal::Int(n),
            _ => Literal::Float(
                self.cursor
                    .slice(whole)
                    .parse()
                    .unwrap_or(f64::INFINITY),
            ),
        }
    }

    /// Base of a chain: parenthesized expression, function call, variable,
    /// or `$`-indirected variable.
    fn parse_lterm(&mut self) -> Result<Expr, ParseError> {
        match self.cursor.current_kind() {
            TokenKind::LParen => self.parse_parenthesized(),
            TokenKind::Ident(name) => {
                self.cursor.advance();
                if self.cursor.check(&TokenKind::LParen) {
                    let args = self.parse_args()?;
                    Ok(Expr::FuncCall {
                        callee: Box::new(Expr::var(name.clone())),
                        args,
                    })
                } else {
                    Ok(Expr::var(name.clone()))
                }
            }
            TokenKind::Dollar => {
                self.cursor.advance();
                let inner = ensure_sufficient_stack(|| self.parse_lterm())?;
                Ok(Expr::EnvRef(Box::new(inner)))
            }
            _ => Err(self.cursor.error("variable, `(`, or `$`")),
        }
    }

    /// Selector: parenthesized expression, method call, bare key, string,
    /// integer, or `$`-indirected term used directly as the key.
    fn parse_rterm(&mut self) -> Result<Expr, ParseError> {
        match self.cursor.current_kind() {
            TokenKind::LParen => self.parse_parenthesized(),
            TokenKind::Ident(name) => {
                self.cursor.advance();
                if self.cursor.check(&TokenKind::LParen) {
                    let args = self.parse_args()?;
                    Ok(Expr::MethCall {
                        name: name.clone(),
                        args,
                    })
                } else {
                    Ok(Expr::string(name.clone()))
                }
            }
            TokenKind::Str(s) => {
                self.cursor.advance();
                Ok(Expr::string(s.clone()))
            }
            TokenKind::Int(n) => {
                self.cursor.advance();
                Ok(Expr::Literal(Literal::Int(*n)))
            }
            TokenKind::IntOverflow => Err(self.cursor.error("index within the 64-bit range")),
            TokenKind::Dollar => {
                self.cursor.advance();
                let inner = ensure_sufficient_stack(|| self.parse_lterm())?;
                Ok(Expr::Indirect(Box::new(inner)))
            }
            _ => Err(self.cursor.error("key, index, method call, `(`, or `$`")),
        }
    }

    /// `'(' expression ')'`
    fn parse_parenthesized(&mut self) -> Result<Expr, ParseError> {
        self.cursor.expect(&TokenKind::LParen)?;
        let inner = self.parse_expression()?;
        self.cursor.expect(&TokenKind::RParen)?;
        Ok(Expr::Indirect(Box::new(inner)))
    }

    /// `'(' ( expression ( ',' expression )* )? ')'`
    fn parse_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.cursor.expect(&TokenKind::LParen)?;
        let mut args = Vec::new();
        if self.cursor.eat(&TokenKind::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_expression()?);
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(&TokenKind::RParen)?;
        Ok(args)
    }
}
