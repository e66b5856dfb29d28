//! Memoized parsing of clause text.
//!
//! A template loop evaluates the same clauses once per iteration. Parse
//! trees do not depend on the environment, so each distinct text is parsed
//! once and the tree is shared afterwards. Failed parses are not cached.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use strux_ir::Expr;
use strux_parse::ParseError;

use crate::{reduce, EvalResult, Environment};

/// Thread-safe map from expression text to its parse tree.
#[derive(Default)]
pub struct ParseCache {
    trees: RwLock<FxHashMap<Box<str>, Arc<Expr>>>,
}

impl ParseCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse tree for `source`, parsing it on first use.
    pub fn get_or_parse(&self, source: &str) -> Result<Arc<Expr>, ParseError> {
        // Fast path: already parsed
        if let Some(tree) = self.trees.read().get(source) {
            return Ok(Arc::clone(tree));
        }

        let tree = Arc::new(strux_parse::parse(source)?);
        let mut guard = self.trees.write();
        // Another caller may have raced us; keep the first tree
        let entry = guard.entry(source.into()).or_insert(tree);
        Ok(Arc::clone(entry))
    }

    /// Evaluate `source` in `env` through the cache.
    pub fn evaluate(&self, source: &str, env: &Environment<'_>) -> EvalResult {
        let tree = self.get_or_parse(source)?;
        reduce(&tree, env)
    }

    /// Number of cached trees.
    pub fn len(&self) -> usize {
        self.trees.read().len()
    }

    /// Returns `true` if nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.trees.read().is_empty()
    }

    /// Drop every cached tree.
    pub fn clear(&self) {
        self.trees.write().clear();
    }
}

impl std::fmt::Debug for ParseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParseCache").field("len", &self.len()).finish()
    }
}
