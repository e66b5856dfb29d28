//! Tree-walking reduction of expressions.

use strux_ir::{BoolOp, Expr, Literal};
use strux_stack::ensure_sufficient_stack;
use strux_value::Value;
use tracing::trace;

use crate::{EvalError, EvalResult, Environment};

/// Parse `source` and reduce it in `env`.
pub fn evaluate(source: &str, env: &Environment<'_>) -> EvalResult {
    let expr = strux_parse::parse(source)?;
    reduce(&expr, env)
}

/// Reduce a parse tree to a single value.
pub fn reduce(expr: &Expr, env: &Environment<'_>) -> EvalResult {
    ensure_sufficient_stack(|| match expr {
        Expr::Literal(literal) => Ok(literal_value(literal)),
        Expr::EnvRef(name) => {
            let name = reduce(name, env)?.to_text();
            Ok(env.get(&name))
        }
        Expr::Indirect(inner) => reduce(inner, env),
        Expr::Not(operand) => Ok(Value::bool(!reduce(operand, env)?.is_truthy())),
        Expr::BoolChain { first, rest } => reduce_chain(first, rest, env),
        Expr::FuncCall { callee, args } => {
            let func = match reduce(callee, env)? {
                Value::Callable(func) => func,
                other => {
                    return Err(EvalError::NotCallable {
                        type_name: other.type_name(),
                    })
                }
            };
            let args = reduce_args(args, env)?;
            trace!(name = func.name(), argc = args.len(), "call");
            func.call(&args).map_err(|source| EvalError::Call {
                name: func.name().to_string(),
                source,
            })
        }
        Expr::MethCall { name, .. } => Err(EvalError::MethodWithoutReceiver { name: name.clone() }),
        Expr::Dot { base, selectors } => {
            let mut current = reduce(base, env)?;
            for selector in selectors {
                current = select(&current, selector, env)?;
            }
            Ok(current)
        }
    })
}

/// Left fold over `?` / `:`.
///
/// A skipped operand is never reduced, but the fold continues with the
/// next operator using the value that survived.
fn reduce_chain(first: &Expr, rest: &[(BoolOp, Expr)], env: &Environment<'_>) -> EvalResult {
    let mut current = reduce(first, env)?;
    for (op, operand) in rest {
        let replace = match op {
            BoolOp::And => current.is_truthy(),
            BoolOp::Or => !current.is_truthy(),
        };
        if replace {
            current = reduce(operand, env)?;
        }
    }
    Ok(current)
}

/// Apply one selector, dispatching on the runtime kind of `current`.
fn select(current: &Value, selector: &Expr, env: &Environment<'_>) -> EvalResult {
    match current {
        Value::Object(object) => {
            let (name, args) = match selector {
                Expr::MethCall { name, args } => (name.clone(), reduce_args(args, env)?),
                // Attribute access is a zero-argument method call
                other => (reduce(other, env)?.to_text(), Vec::new()),
            };
            trace!(type_name = object.type_name(), method = %name, "dispatch");
            object
                .call(&name, &args)
                .map_err(|source| EvalError::Call { name, source })
        }
        Value::Mapping(map) => {
            let key = reduce(selector, env)?.to_text();
            Ok(map.get(&key).cloned().unwrap_or_default())
        }
        Value::List(items) => {
            let index = reduce(selector, env)?;
            Ok(index
                .as_index()
                .and_then(|i| list_get(items, i))
                .cloned()
                .unwrap_or_default())
        }
        other => Err(EvalError::SubselectOnScalar {
            type_name: other.type_name(),
            selector: selector_label(selector),
        }),
    }
}

/// Arguments are reduced left to right, each to a single value.
fn reduce_args(args: &[Expr], env: &Environment<'_>) -> Result<Vec<Value>, EvalError> {
    args.iter().map(|arg| reduce(arg, env)).collect()
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::Str(s) => Value::string(s.clone()),
        Literal::Int(n) => Value::int(*n),
        Literal::Float(f) => Value::float(*f),
    }
}

fn selector_label(selector: &Expr) -> String {
    match selector {
        Expr::Literal(Literal::Str(s)) => s.clone(),
        Expr::Literal(Literal::Int(n)) => n.to_string(),
        Expr::Literal(Literal::Float(f)) => f.to_string(),
        Expr::MethCall { name, .. } => format!("{name}(..)"),
        _ => "(..)".to_string(),
    }
}

/// Element at `index`; negative indices count from the end.
pub fn list_get(items: &[Value], index: i64) -> Option<&Value> {
    let len = i64::try_from(items.len()).ok()?;
    let resolved = if index < 0 { len + index } else { index };
    usize::try_from(resolved).ok().and_then(|i| items.get(i))
}

#[cfg(test)]
mod tests;
