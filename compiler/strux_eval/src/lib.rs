//! Strux Eval - environments and the expression evaluator.
//!
//! # Architecture
//!
//! - [`Environment`]: one frame of bindings plus a borrowed parent frame
//! - [`parse`]: text to [`Expr`] (re-exported from `strux_parse`)
//! - [`reduce`]: [`Expr`] plus an [`Environment`] to a single [`Value`]
//! - [`evaluate`]: `parse` then `reduce`
//! - [`ParseCache`]: memoized `parse` for callers that evaluate the same
//!   clause text many times (the template engine)
//!
//! Parse trees never hold on to an environment, so one tree can be reduced
//! against any number of scopes.

mod cache;
mod environment;
mod errors;
mod eval;

pub use cache::ParseCache;
pub use environment::{EnvOptions, Environment};
pub use errors::{EvalError, EvalResult};
pub use eval::{evaluate, list_get, reduce};

pub use strux_ir::Expr;
pub use strux_parse::{parse, ParseError};
pub use strux_value::{CallError, Callable, Mapping, Object, Scalar, Value};
