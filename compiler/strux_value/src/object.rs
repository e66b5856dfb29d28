//! Capability interface for host objects with name-based dispatch.

use std::fmt;

use crate::{CallResult, Value};

/// A host instance whose methods are resolved by name at runtime.
///
/// Dot chains never look at the concrete type: `obj.name` becomes
/// `call("name", &[])` and `obj.name(a, b)` becomes `call("name", &[a, b])`.
/// Implementations report unknown names with
/// [`CallError::NoSuchMethod`](crate::CallError::NoSuchMethod).
pub trait Object: fmt::Debug + Send + Sync {
    /// Type name for diagnostics.
    fn type_name(&self) -> &str;

    /// Invoke the method `name`.
    fn call(&self, name: &str, args: &[Value]) -> CallResult;
}
