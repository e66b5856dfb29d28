//! The template engine entry point and the recursive walk.

use std::fmt;
use std::path::PathBuf;

use strux_eval::{Environment, ParseCache, Value};
use strux_stack::ensure_sufficient_stack;
use strux_value::Callable;
use tracing::{debug, trace};

use crate::codec::{Codec, JsonCodec};
use crate::loader::{FsLoader, Loader};
use crate::produced::{Flags, Produced};
use crate::{directive, list, mapping, TemplateError, TemplateResult};

/// A configured template engine.
///
/// Holds the include search path, the loader and codec used by the `.`
/// directive, and a cache of parsed clauses shared by every `process` call.
pub struct Template {
    include_paths: Vec<PathBuf>,
    loader: Box<dyn Loader>,
    codec: Box<dyn Codec>,
    clauses: ParseCache,
}

impl Template {
    /// Engine reading JSON includes from the filesystem, relative to `.`.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> TemplateBuilder {
        TemplateBuilder::default()
    }

    /// Append directories to the include search path.
    pub fn add_include_paths<I, P>(&mut self, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.include_paths.extend(paths.into_iter().map(Into::into));
    }

    /// Include search path, in lookup order.
    pub fn include_paths(&self) -> &[PathBuf] {
        &self.include_paths
    }

    /// Transform `template` against `data`.
    ///
    /// A mapping `data` becomes the root scope; anything else gives an empty
    /// root scope. A template that produces nothing yields `Null`.
    pub fn process(&self, template: &Value, data: &Value) -> TemplateResult<Value> {
        if template.is_null() {
            return Ok(Value::Null);
        }
        debug!(
            includes = self.include_paths.len(),
            kind = template.type_name(),
            "process"
        );
        let root = Environment::from_value(data, None);
        Ok(self.walk(template, &root, Flags::SINGLE)?.into_value())
    }

    /// Transform one node.
    pub(crate) fn walk(
        &self,
        node: &Value,
        env: &Environment<'_>,
        flags: Flags,
    ) -> TemplateResult<Produced> {
        ensure_sufficient_stack(|| match node {
            Value::Scalar(scalar) => match node.as_str() {
                Some(text) => directive::scalar(self, text, env, flags),
                None => Ok(Produced::One(Value::Scalar(scalar.clone()))),
            },
            Value::List(items) => list::walk_list(self, items, env, flags),
            Value::Mapping(map) => mapping::walk_mapping(self, map, env, flags),
            Value::Null | Value::Callable(_) | Value::Object(_) => Ok(Produced::One(node.clone())),
        })
    }

    /// Evaluate a clause through the parse cache.
    pub(crate) fn eval(&self, clause: &str, env: &Environment<'_>) -> TemplateResult<Value> {
        self.clauses
            .evaluate(clause, env)
            .map_err(|source| TemplateError::eval(clause, source))
    }

    /// Evaluate a clause that must name a callable.
    pub(crate) fn eval_callable(
        &self,
        clause: &str,
        env: &Environment<'_>,
    ) -> TemplateResult<Callable> {
        match self.eval(clause, env)? {
            Value::Callable(func) => Ok(func),
            other => Err(TemplateError::NotCallable {
                clause: clause.to_string(),
                found: other.type_name(),
            }),
        }
    }

    /// Find, read, decode and walk an included file in the current scope.
    pub(crate) fn include(
        &self,
        file: &str,
        env: &Environment<'_>,
        flags: Flags,
    ) -> TemplateResult<Produced> {
        let mut searched = Vec::with_capacity(self.include_paths.len());
        for dir in &self.include_paths {
            let candidate = dir.join(file);
            trace!(path = %candidate.display(), "include candidate");
            if !self.loader.exists(&candidate) {
                searched.push(candidate);
                continue;
            }
            debug!(path = %candidate.display(), "include");
            let bytes = self
                .loader
                .read(&candidate)
                .map_err(|source| TemplateError::IncludeRead {
                    path: candidate.clone(),
                    source,
                })?;
            let decoded = self
                .codec
                .decode(&bytes)
                .map_err(|source| TemplateError::IncludeDecode {
                    path: candidate,
                    source,
                })?;
            return self.walk(&decoded, env, flags);
        }
        Err(TemplateError::IncludeNotFound {
            file: file.to_string(),
            searched,
        })
    }
}

/// Call `func`, reporting failures against the clause that named it.
pub(crate) fn call(clause: &str, func: &Callable, args: &[Value]) -> TemplateResult<Value> {
    trace!(name = func.name(), argc = args.len(), "template call");
    func.call(args).map_err(|source| {
        TemplateError::eval(
            clause,
            strux_eval::EvalError::Call {
                name: func.name().to_string(),
                source,
            },
        )
    })
}

impl Default for Template {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("include_paths", &self.include_paths)
            .field("clauses", &self.clauses)
            .finish_non_exhaustive()
    }
}

/// Configuration for a [`Template`].
#[derive(Default)]
pub struct TemplateBuilder {
    include_paths: Vec<PathBuf>,
    loader: Option<Box<dyn Loader>>,
    codec: Option<Box<dyn Codec>>,
}

impl TemplateBuilder {
    /// Add one include directory. Without any, the search path is `.`.
    #[must_use]
    pub fn include_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.include_paths.push(path.into());
        self
    }

    #[must_use]
    pub fn include_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.include_paths.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Replace the filesystem loader.
    #[must_use]
    pub fn loader(mut self, loader: impl Loader + 'static) -> Self {
        self.loader = Some(Box::new(loader));
        self
    }

    /// Replace the JSON codec.
    #[must_use]
    pub fn codec(mut self, codec: impl Codec + 'static) -> Self {
        self.codec = Some(Box::new(codec));
        self
    }

    pub fn build(self) -> Template {
        let include_paths = if self.include_paths.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            self.include_paths
        };
        Template {
            include_paths,
            loader: self.loader.unwrap_or_else(|| Box::new(FsLoader)),
            codec: self.codec.unwrap_or_else(|| Box::new(JsonCodec)),
            clauses: ParseCache::new(),
        }
    }
}
