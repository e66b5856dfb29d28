//! Template errors.
//!
//! Every failure aborts the whole `process` call. Variants carry the clause
//! text or path that triggered them so hosts can point at the template node.

use std::io;
use std::path::PathBuf;

use strux_eval::EvalError;

use crate::codec::CodecError;

/// Result of processing a template.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Failure while processing a template.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// A clause failed to parse or evaluate.
    #[error("in clause `{clause}`: {source}")]
    Eval {
        clause: String,
        #[source]
        source: EvalError,
    },

    /// No include path holds the requested file.
    #[error("include `{file}` not found (searched: {})", join_paths(.searched))]
    IncludeNotFound { file: String, searched: Vec<PathBuf> },

    /// The loader found the file but could not read it.
    #[error("cannot read include `{}`: {source}", .path.display())]
    IncludeRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The codec rejected the file contents.
    #[error("cannot decode include `{}`: {source}", .path.display())]
    IncludeDecode {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    /// A `/` comment key whose value is itself a `/` comment.
    #[error("comment key `{key}` cannot carry a commented value")]
    CommentedValue { key: String },

    /// A construct that merges mappings got something else.
    #[error("`{construct}` construct needs a mapping, found {found}")]
    HashConstructType {
        construct: &'static str,
        found: &'static str,
    },

    /// A loop clause that is neither a list nor null.
    #[error("loop clause `{clause}` is {found}, not a list")]
    LoopType { clause: String, found: &'static str },

    /// A call directive whose clause is not a callable.
    #[error("clause `{clause}` is {found}, not callable")]
    NotCallable { clause: String, found: &'static str },
}

impl TemplateError {
    pub(crate) fn eval(clause: &str, source: EvalError) -> Self {
        TemplateError::Eval {
            clause: clause.to_string(),
            source,
        }
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "no include paths".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
