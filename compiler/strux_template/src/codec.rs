//! Decoding of included files.
//!
//! The engine only sees the [`Codec`] trait. [`JsonCodec`] is the default and
//! [`from_json`] / [`to_json`] convert between `serde_json` documents and
//! [`Value`] for hosts.

use serde_json::{Map, Number};
use strux_value::{Mapping, Scalar, Value};

/// Failure reported by a [`Codec`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Other(String),
}

/// Turns raw file contents into a template value.
pub trait Codec: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<Value, CodecError>;
}

/// JSON documents via `serde_json`.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn decode(&self, bytes: &[u8]) -> Result<Value, CodecError> {
        let document: serde_json::Value = serde_json::from_slice(bytes)?;
        Ok(from_json(document))
    }
}

/// Convert a JSON document. Object key order is preserved.
pub fn from_json(document: serde_json::Value) -> Value {
    match document {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::bool(b),
        serde_json::Value::Number(n) => number(&n),
        serde_json::Value::String(s) => Value::string(s),
        serde_json::Value::Array(items) => items.into_iter().map(from_json).collect(),
        serde_json::Value::Object(entries) => Value::mapping(
            entries
                .into_iter()
                .map(|(k, v)| (k, from_json(v)))
                .collect::<Mapping>(),
        ),
    }
}

fn number(n: &Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::int(i)
    } else {
        // u64 beyond i64 and every non-integer
        Value::float(n.as_f64().unwrap_or(f64::NAN))
    }
}

/// Convert a value back to JSON.
///
/// Callables, objects and non-finite floats have no JSON form and become
/// `null`.
pub fn to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null | Value::Callable(_) | Value::Object(_) => serde_json::Value::Null,
        Value::Scalar(Scalar::Bool(b)) => serde_json::Value::Bool(*b),
        Value::Scalar(Scalar::Int(n)) => serde_json::Value::from(*n),
        Value::Scalar(Scalar::Float(f)) => Number::from_f64(*f)
            .map_or(serde_json::Value::Null, serde_json::Value::Number),
        Value::Scalar(Scalar::Str(s)) => serde_json::Value::String(s.clone()),
        Value::List(items) => serde_json::Value::Array(items.iter().map(to_json).collect()),
        Value::Mapping(map) => serde_json::Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), to_json(v)))
                .collect::<Map<_, _>>(),
        ),
    }
}
