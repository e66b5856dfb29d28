//! Mapping nodes: hash constructs, switches and merges.

use strux_eval::{Environment, Mapping, Value};
use tracing::{debug, trace};

use crate::produced::{Flags, Produced};
use crate::template::call;
use crate::{Template, TemplateError, TemplateResult};

pub(crate) fn walk_mapping(
    template: &Template,
    map: &Mapping,
    env: &Environment<'_>,
    flags: Flags,
) -> TemplateResult<Produced> {
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort_unstable();

    // At most one construct per node; `%` sorts before `?`
    if let Some(key) = keys.iter().find(|k| k.starts_with('%') || k.starts_with('?')) {
        let body = &map[key.as_str()];
        return match key.split_at(1) {
            ("%", clause) => hash_construct(template, clause, body, env, flags),
            (_, clause) => switch(template, clause, body, env, flags),
        };
    }

    // Merge keys first so plain keys override what they bring in
    keys.sort_by_key(|k| (!k.starts_with('<'), *k));

    let mut out = Mapping::new();
    for key in keys {
        let value = &map[key.as_str()];
        match key.chars().next() {
            Some('<') => {
                let merged = template.walk(value, env, Flags::MERGE)?;
                merge(&mut out, merged, "<")?;
            }
            Some('/') => {
                if value.as_str().is_some_and(|v| v.starts_with('/')) {
                    return Err(TemplateError::CommentedValue { key: key.clone() });
                }
                trace!(key = %key, "comment key");
            }
            Some('^') => {
                let clause = &key[1..];
                let func = template.eval_callable(clause, env)?;
                let arg = template.walk(value, env, Flags::SINGLE)?;
                let result = call(clause, &func, &arg.into_args())?;
                merge(&mut out, Produced::One(result), "^")?;
            }
            _ => {
                let name = template.walk(&Value::string(key.as_str()), env, Flags::SINGLE)?;
                match template.walk(value, env, Flags::SINGLE)? {
                    Produced::Nothing => {}
                    produced => {
                        out.insert(name.into_value().to_text(), produced.into_value());
                    }
                }
            }
        }
    }
    Ok(Produced::emit(Value::mapping(out), flags))
}

/// `%clause`: walk `body` once per entry of `clause` with `key` and `value`
/// bound, merging the resulting mappings.
fn hash_construct(
    template: &Template,
    clause: &str,
    body: &Value,
    env: &Environment<'_>,
    flags: Flags,
) -> TemplateResult<Produced> {
    let entries = match template.eval(clause, env)? {
        Value::Null => Default::default(),
        Value::Mapping(entries) => entries,
        other => {
            return Err(TemplateError::HashConstructType {
                construct: "%",
                found: other.type_name(),
            })
        }
    };
    debug!(clause, entries = entries.len(), "hash construct");

    let mut out = Mapping::new();
    for (key, value) in entries.iter() {
        let mut bindings = Mapping::with_capacity(2);
        bindings.insert("key".to_string(), Value::string(key.as_str()));
        bindings.insert("value".to_string(), value.clone());
        let scope = Environment::child(env, bindings);
        let produced = template.walk(body, &scope, Flags::SINGLE)?;
        merge(&mut out, produced, "%")?;
    }
    Ok(Produced::emit(Value::mapping(out), flags))
}

/// `?clause`: walk the case named by `clause`, or the `?` case.
fn switch(
    template: &Template,
    clause: &str,
    cases: &Value,
    env: &Environment<'_>,
    flags: Flags,
) -> TemplateResult<Produced> {
    let Some(cases) = cases.as_mapping() else {
        return Err(TemplateError::HashConstructType {
            construct: "?",
            found: cases.type_name(),
        });
    };
    let selected = template.eval(clause, env)?;
    let case = if selected.is_null() {
        None
    } else {
        cases.get(&selected.to_text())
    };
    trace!(clause, matched = case.is_some(), "switch");
    match case.or_else(|| cases.get("?")) {
        Some(body) => template.walk(body, env, flags),
        None => Ok(Produced::Nothing),
    }
}

/// Merge a produced mapping into `out`; later keys win.
fn merge(out: &mut Mapping, produced: Produced, construct: &'static str) -> TemplateResult<()> {
    match produced {
        Produced::Nothing => Ok(()),
        Produced::One(Value::Mapping(entries)) => {
            out.extend(entries.iter().map(|(k, v)| (k.clone(), v.clone())));
            Ok(())
        }
        other => Err(TemplateError::HashConstructType {
            construct,
            found: other.into_value().type_name(),
        }),
    }
}
