//! Environment for variable scoping.
//!
//! Each [`Environment`] is one frame of bindings. A child frame borrows its
//! parent, so frames form a tree that only points upward: a parent can never
//! reach its children, and the borrow checker guarantees a parent outlives
//! every frame built on top of it. Frames live exactly as long as the
//! template call or loop iteration that created them.

use strux_value::{Mapping, Value};

use crate::eval::list_get;
use crate::EvalError;

/// Construction options for [`Environment::new`].
#[derive(Clone, Copy, Default)]
pub struct EnvOptions<'p> {
    /// Reject every [`Environment::set`].
    pub immutable: bool,
    /// Frame consulted when a key is not bound locally.
    pub parent: Option<&'p Environment<'p>>,
}

/// One frame of bindings with parent fallback.
#[derive(Debug)]
pub struct Environment<'p> {
    /// Local bindings.
    data: Mapping,
    /// Whether `set` is rejected.
    immutable: bool,
    /// Enclosing frame (borrowed, never owned).
    parent: Option<&'p Environment<'p>>,
}

impl<'p> Environment<'p> {
    /// Create a frame from bindings and options.
    pub fn new(data: Mapping, options: EnvOptions<'p>) -> Self {
        Environment {
            data,
            immutable: options.immutable,
            parent: options.parent,
        }
    }

    /// Mutable frame with no parent.
    pub fn root(data: Mapping) -> Self {
        Self::new(data, EnvOptions::default())
    }

    /// Mutable frame on top of `parent`.
    pub fn child(parent: &'p Environment<'p>, data: Mapping) -> Self {
        Self::new(
            data,
            EnvOptions {
                immutable: false,
                parent: Some(parent),
            },
        )
    }

    /// Frame whose bindings are the entries of `value`.
    ///
    /// A mapping contributes its entries; any other value gives an empty
    /// frame, so lookups fall through to `parent`.
    pub fn from_value(value: &Value, parent: Option<&'p Environment<'p>>) -> Self {
        let data = value.as_mapping().cloned().unwrap_or_default();
        Self::new(
            data,
            EnvOptions {
                immutable: false,
                parent,
            },
        )
    }

    /// Look up a binding in this frame or the nearest ancestor that has it.
    ///
    /// Presence stops the search: a key bound to `Null` hides any binding of
    /// the same key further up.
    pub fn lookup(&self, key: &str) -> Option<&Value> {
        let mut frame = Some(self);
        while let Some(env) = frame {
            if let Some(value) = env.data.get(key) {
                return Some(value);
            }
            frame = env.parent;
        }
        None
    }

    /// Value bound to `key`, or `Null` when unresolved.
    pub fn get(&self, key: &str) -> Value {
        self.lookup(key).cloned().unwrap_or_default()
    }

    /// Whether `key` is bound anywhere in the chain.
    pub fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Bind `key` in this frame only and return the stored value.
    ///
    /// Fails without touching any binding when the frame is immutable.
    pub fn set(&mut self, key: impl Into<String>, value: Value) -> Result<Value, EvalError> {
        let key = key.into();
        if self.immutable {
            return Err(EvalError::ImmutableWrite { key });
        }
        self.data.insert(key, value.clone());
        Ok(value)
    }

    /// Resolve a dotted path such as `user.addresses.0.city`.
    ///
    /// The last segment is one step into the value the rest resolves to:
    /// an integer indexes a list (negative counts from the end), anything
    /// else keys a mapping. All other combinations give `Null`.
    pub fn resolve(&self, path: &str) -> Value {
        let Some((head, step)) = path.rsplit_once('.') else {
            return self.get(path);
        };
        match self.resolve(head) {
            Value::List(items) => step
                .parse::<i64>()
                .ok()
                .and_then(|index| list_get(&items, index))
                .cloned()
                .unwrap_or_default(),
            Value::Mapping(map) => map.get(step).cloned().unwrap_or_default(),
            _ => Value::Null,
        }
    }

    /// Local bindings of this frame.
    pub fn data(&self) -> &Mapping {
        &self.data
    }

    /// Whether `set` is rejected.
    pub fn is_immutable(&self) -> bool {
        self.immutable
    }

    /// Enclosing frame, if any.
    pub fn parent(&self) -> Option<&'p Environment<'p>> {
        self.parent
    }

    /// Number of frames from here to the root, inclusive.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut frame = self.parent;
        while let Some(env) = frame {
            depth += 1;
            frame = env.parent;
        }
        depth
    }
}

impl Default for Environment<'_> {
    fn default() -> Self {
        Self::root(Mapping::new())
    }
}
