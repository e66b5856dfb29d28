//! Recursion flags and node results.

use strux_value::Value;

/// Kind of container collecting the current node's result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Context {
    List,
    Mapping,
    Single,
}

/// Flags threaded through the walk alongside the scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Flags {
    pub context: Context,
    /// Splice a produced container into its parent instead of nesting it.
    pub interpolate: bool,
}

impl Flags {
    pub const SINGLE: Flags = Flags {
        context: Context::Single,
        interpolate: false,
    };

    pub const LIST: Flags = Flags {
        context: Context::List,
        interpolate: false,
    };

    /// Mapping context with forced interpolation (`<` keys).
    pub const MERGE: Flags = Flags {
        context: Context::Mapping,
        interpolate: true,
    };

    /// Same context, interpolating if `force` is set.
    #[must_use]
    pub fn forced(self, force: bool) -> Flags {
        Flags {
            interpolate: self.interpolate || force,
            ..self
        }
    }
}

/// What one template node contributes to its parent.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Produced {
    /// No element or key at all.
    Nothing,
    One(Value),
    /// Elements spliced into the enclosing list.
    Many(Vec<Value>),
}

impl Produced {
    /// Wrap `value`, splicing a list when the flags ask for list interpolation.
    pub fn emit(value: Value, flags: Flags) -> Produced {
        if flags.interpolate && flags.context == Context::List {
            if let Value::List(items) = value {
                return Produced::Many(std::sync::Arc::unwrap_or_clone(items));
            }
        }
        Produced::One(value)
    }

    /// Single value for non-list consumers; `Nothing` becomes `Null`.
    pub fn into_value(self) -> Value {
        match self {
            Produced::Nothing => Value::Null,
            Produced::One(value) => value,
            Produced::Many(items) => Value::list(items),
        }
    }

    /// Append to a list under construction.
    pub fn extend_into(self, out: &mut Vec<Value>) {
        match self {
            Produced::Nothing => {}
            Produced::One(value) => out.push(value),
            Produced::Many(items) => out.extend(items),
        }
    }

    /// Arguments for a capturing call: nothing means no argument.
    pub fn into_args(self) -> Vec<Value> {
        match self {
            Produced::Nothing => Vec::new(),
            Produced::One(value) => vec![value],
            Produced::Many(items) => vec![Value::list(items)],
        }
    }
}
