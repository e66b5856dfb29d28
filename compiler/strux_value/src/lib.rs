//! Strux Value - runtime data model shared by the evaluator and the template engine.
//!
//! Templates, input data, expression results and template output are all
//! [`Value`]s. The model is deliberately small:
//!
//! - `Null`
//! - `Scalar`: a string or a number (plus booleans, so decoded documents
//!   survive a round trip)
//! - `List` and `Mapping` (ordered, unique string keys)
//! - `Callable`: a host function
//! - `Object`: a host instance answering method calls by name
//!
//! Containers are reference counted, so cloning a `Value` never copies the
//! underlying data.

mod callable;
mod object;
mod scalar;
mod value;

pub use callable::{CallError, CallResult, Callable};
pub use object::Object;
pub use scalar::Scalar;
pub use value::{Mapping, Value};
