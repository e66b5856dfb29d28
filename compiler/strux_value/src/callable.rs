//! Host functions exposed to expressions and templates.

use std::fmt;
use std::sync::Arc;

use crate::Value;

/// Result of invoking a [`Callable`] or an [`Object`](crate::Object) method.
pub type CallResult = Result<Value, CallError>;

type NativeFn = dyn Fn(&[Value]) -> CallResult + Send + Sync;

/// Failure reported by host code during a call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CallError {
    /// Wrong number of arguments.
    #[error("expected {expected} argument(s), got {got}")]
    Arity { expected: usize, got: usize },
    /// The receiver has no method with this name.
    #[error("no method `{method}` on {type_name}")]
    NoSuchMethod { method: String, type_name: String },
    /// Any other host-side failure.
    #[error("{0}")]
    Failed(String),
}

impl CallError {
    /// Free-form host failure.
    pub fn failed(message: impl Into<String>) -> Self {
        CallError::Failed(message.into())
    }

    /// Fail unless exactly `expected` arguments were passed.
    pub fn check_arity(args: &[Value], expected: usize) -> Result<(), CallError> {
        if args.len() == expected {
            Ok(())
        } else {
            Err(CallError::Arity {
                expected,
                got: args.len(),
            })
        }
    }
}

/// A named, reference-counted host function.
///
/// Two callables are equal only if they share the same allocation.
#[derive(Clone)]
pub struct Callable {
    name: Arc<str>,
    func: Arc<NativeFn>,
}

impl Callable {
    /// Wrap a host function.
    pub fn new(
        name: impl Into<Arc<str>>,
        func: impl Fn(&[Value]) -> CallResult + Send + Sync + 'static,
    ) -> Self {
        Callable {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Name used in diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke with the given arguments.
    #[inline]
    pub fn call(&self, args: &[Value]) -> CallResult {
        (self.func)(args)
    }

    /// Identity comparison.
    pub fn ptr_eq(&self, other: &Callable) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.func).cast::<()>(),
            Arc::as_ptr(&other.func).cast::<()>(),
        )
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Callable").field(&self.name).finish()
    }
}
