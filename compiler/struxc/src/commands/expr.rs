//! `strux eval` and `strux parse`: expression debugging.

use std::path::Path;

use strux_eval::{evaluate, parse, Environment};

use super::{read_data, write_json, CliError};

/// Evaluate `source` against an optional JSON data file.
pub fn eval_expression(source: &str, data: Option<&Path>) -> Result<String, CliError> {
    let data = read_data(data)?;
    let env = Environment::from_value(&data, None);
    let value = evaluate(source, &env)?;
    write_json(&value, false)
}

/// Parse `source` and return its tree as pretty JSON.
pub fn parse_expression(source: &str) -> Result<String, CliError> {
    let expr = parse(source).map_err(strux_eval::EvalError::from)?;
    serde_json::to_string_pretty(&expr).map_err(CliError::Output)
}
