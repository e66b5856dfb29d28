//! Grammar errors.

use strux_ir::Span;

/// Malformed expression text.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("grammar error at {span}: expected {expected}, found {found}")]
pub struct ParseError {
    /// Location of the offending token.
    pub span: Span,
    /// What the grammar allowed here.
    pub expected: String,
    /// What was there instead.
    pub found: String,
}

impl ParseError {
    pub fn new(span: Span, expected: impl Into<String>, found: impl Into<String>) -> Self {
        ParseError {
            span,
            expected: expected.into(),
            found: found.into(),
        }
    }
}
