//! Evaluation errors.

use strux_parse::ParseError;
use strux_value::{CallError, Value};

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Failure while parsing or reducing an expression.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EvalError {
    /// Expression text does not match the grammar.
    #[error(transparent)]
    Grammar(#[from] ParseError),

    /// `set` on an immutable environment.
    #[error("cannot bind `{key}`: environment is immutable")]
    ImmutableWrite { key: String },

    /// A selector applied to something that is neither a container nor an object.
    #[error("cannot select `{selector}` from {type_name}")]
    SubselectOnScalar {
        type_name: &'static str,
        selector: String,
    },

    /// Call syntax applied to a value that is not a callable.
    #[error("{type_name} is not callable")]
    NotCallable { type_name: &'static str },

    /// A method call node reduced outside of a dot chain.
    #[error("method `{name}` has no receiver")]
    MethodWithoutReceiver { name: String },

    /// Host code reported a failure.
    #[error("call to `{name}` failed: {source}")]
    Call {
        name: String,
        #[source]
        source: CallError,
    },
}
