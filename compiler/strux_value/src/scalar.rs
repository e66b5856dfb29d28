//! Scalar leaves: strings and numbers.

use std::fmt;

/// A string-or-number leaf value.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    /// Boolean, as produced by `!` or decoded from a document.
    Bool(bool),
    /// Integer number.
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// String.
    Str(String),
}

impl Scalar {
    /// Host scalar truthiness.
    ///
    /// `false`, `0`, `0.0`, `""` and `"0"` are false; everything else is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Scalar::Bool(b) => *b,
            Scalar::Int(n) => *n != 0,
            Scalar::Float(f) => *f != 0.0,
            Scalar::Str(s) => !(s.is_empty() || s == "0"),
        }
    }

    /// Interpret this scalar as a list index.
    ///
    /// Integers, integral floats and strings holding an integer qualify.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        reason = "only integral floats inside the i64 range reach the cast"
    )]
    pub fn as_index(&self) -> Option<i64> {
        match self {
            Scalar::Int(n) => Some(*n),
            Scalar::Float(f)
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 =>
            {
                Some(*f as i64)
            }
            Scalar::Str(s) => s.trim().parse().ok(),
            Scalar::Bool(_) | Scalar::Float(_) => None,
        }
    }

    /// Short kind name for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Bool(_) => "bool",
            Scalar::Int(_) => "int",
            Scalar::Float(_) => "float",
            Scalar::Str(_) => "str",
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Int(n) => write!(f, "{n}"),
            Scalar::Float(n) => write!(f, "{n}"),
            Scalar::Str(s) => f.write_str(s),
        }
    }
}
