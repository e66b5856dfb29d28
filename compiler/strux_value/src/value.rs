//! The `Value` enum and its factory methods.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::{Callable, Object, Scalar};

/// Ordered mapping with unique string keys.
pub type Mapping = IndexMap<String, Value>;

/// Runtime value.
#[derive(Clone, Default)]
pub enum Value {
    /// Absence of a value.
    #[default]
    Null,
    /// String or number leaf.
    Scalar(Scalar),
    /// Ordered sequence.
    List(Arc<Vec<Value>>),
    /// Ordered mapping with unique keys.
    Mapping(Arc<Mapping>),
    /// Host function.
    Callable(Callable),
    /// Host object with dynamic method dispatch.
    Object(Arc<dyn Object>),
}

// Factory Methods

impl Value {
    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Scalar(Scalar::Str(s.into()))
    }

    /// Create an integer value.
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Scalar(Scalar::Int(n))
    }

    /// Create a floating-point value.
    #[inline]
    pub fn float(f: f64) -> Self {
        Value::Scalar(Scalar::Float(f))
    }

    /// Create a boolean value.
    #[inline]
    pub fn bool(b: bool) -> Self {
        Value::Scalar(Scalar::Bool(b))
    }

    /// Create a list value.
    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Arc::new(items))
    }

    /// Create a mapping value.
    #[inline]
    pub fn mapping(entries: Mapping) -> Self {
        Value::Mapping(Arc::new(entries))
    }

    /// Create a mapping value from key/value pairs, keeping their order.
    ///
    /// ```text
    /// let row = Value::from_pairs([("title", Value::string("a")), ("n", Value::int(1))]);
    /// ```
    pub fn from_pairs<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::mapping(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Wrap a host function.
    pub fn callable(
        name: impl Into<Arc<str>>,
        func: impl Fn(&[Value]) -> crate::CallResult + Send + Sync + 'static,
    ) -> Self {
        Value::Callable(Callable::new(name, func))
    }

    /// Wrap a host object.
    pub fn object(object: impl Object + 'static) -> Self {
        Value::Object(Arc::new(object))
    }
}

// Inspection

impl Value {
    /// Engine truthiness.
    ///
    /// Scalars follow host rules (see [`Scalar::is_truthy`]). Containers are
    /// true only when non-empty, even though they are non-null references.
    /// Callables and objects are always true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Scalar(s) => s.is_truthy(),
            Value::List(items) => !items.is_empty(),
            Value::Mapping(map) => !map.is_empty(),
            Value::Callable(_) | Value::Object(_) => true,
        }
    }

    /// Returns `true` for `Null`.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Kind name for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Scalar(s) => s.type_name(),
            Value::List(_) => "list",
            Value::Mapping(_) => "mapping",
            Value::Callable(_) => "callable",
            Value::Object(_) => "object",
        }
    }

    /// Borrow as a string slice, if this is a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Scalar(Scalar::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// Borrow as a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow as a mapping.
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Interpret as a list index (see [`Scalar::as_index`]).
    pub fn as_index(&self) -> Option<i64> {
        match self {
            Value::Scalar(s) => s.as_index(),
            _ => None,
        }
    }

    /// String form used for text substitution and mapping keys.
    ///
    /// `Null` becomes the empty string.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Scalar(Scalar::Str(s)) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Take the contents of a list, cloning only if shared.
    pub fn into_list(self) -> Option<Vec<Value>> {
        match self {
            Value::List(items) => Some(Arc::try_unwrap(items).unwrap_or_else(|rc| (*rc).clone())),
            _ => None,
        }
    }
}

// Conversions

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Value::Scalar(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}

impl From<Mapping> for Value {
    fn from(entries: Mapping) -> Self {
        Value::mapping(entries)
    }
}

impl From<Callable> for Value {
    fn from(c: Callable) -> Self {
        Value::Callable(c)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Value::list(iter.into_iter().collect())
    }
}

// Trait Implementations

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Scalar(s) => write!(f, "{s}"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Mapping(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
            Value::Callable(c) => write!(f, "<callable {}>", c.name()),
            Value::Object(o) => write!(f, "<{}>", o.type_name()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Scalar(s) => write!(f, "{s:?}"),
            Value::List(items) => f.debug_list().entries(items.iter()).finish(),
            Value::Mapping(map) => f.debug_map().entries(map.iter()).finish(),
            Value::Callable(c) => write!(f, "{c:?}"),
            Value::Object(o) => write!(f, "Object({o:?})"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Scalar(a), Value::Scalar(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Mapping(a), Value::Mapping(b)) => a == b,
            (Value::Callable(a), Value::Callable(b)) => a.ptr_eq(b),
            // Objects are equal by identity
            (Value::Object(a), Value::Object(b)) => {
                std::ptr::eq(Arc::as_ptr(a).cast::<()>(), Arc::as_ptr(b).cast::<()>())
            }
            _ => false,
        }
    }
}
