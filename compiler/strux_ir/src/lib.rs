//! Strux IR - the expression parse tree.
//!
//! The tree is made of plain tagged nodes with no behaviour attached, so it
//! can be cached, compared, or serialized (with the `serde` feature) without
//! any live environment.

mod expr;
mod span;

pub use expr::{BoolOp, Expr, Literal};
pub use span::Span;
