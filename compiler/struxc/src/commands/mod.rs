//! Command handlers for the Strux CLI.
//!
//! Each handler returns the text to print so the binary stays a thin shell
//! around argument parsing and error reporting.

use std::fs;
use std::path::{Path, PathBuf};

use strux_template::{from_json, to_json, TemplateError, Value};

mod expr;
mod render;

pub use expr::{eval_expression, parse_expression};
pub use render::{parse_render_options, render, RenderOptions};

/// Environment variable holding extra include directories.
pub const INCLUDE_PATH_VAR: &str = "STRUX_PATH";

/// Failure of a CLI command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error("cannot read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{}' is not valid JSON: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Eval(#[from] strux_eval::EvalError),

    #[error("cannot serialize output: {0}")]
    Output(#[source] serde_json::Error),
}

/// Read and decode a JSON file.
pub(crate) fn read_json(path: &Path) -> Result<Value, CliError> {
    let bytes = fs::read(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let document = serde_json::from_slice(&bytes).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(from_json(document))
}

/// Optional data file; absent means an empty scope.
pub(crate) fn read_data(path: Option<&Path>) -> Result<Value, CliError> {
    match path {
        Some(path) => read_json(path),
        None => Ok(Value::Null),
    }
}

pub(crate) fn write_json(value: &Value, pretty: bool) -> Result<String, CliError> {
    let document = to_json(value);
    let text = if pretty {
        serde_json::to_string_pretty(&document)
    } else {
        serde_json::to_string(&document)
    };
    text.map_err(CliError::Output)
}
