//! Directives on string leaves.
//!
//! Leaves are matched against [`DIRECTIVES`] top to bottom; the first entry
//! whose marker starts the text handles it with the marker stripped. Text
//! that matches no entry is literal and goes through [`crate::text::expand`].

use strux_eval::{Environment, Value};
use tracing::trace;

use crate::produced::{Context, Flags, Produced};
use crate::template::call;
use crate::{text, Template, TemplateResult};

type Handler = fn(&Template, &str, &Environment<'_>, Flags) -> TemplateResult<Produced>;

/// One row of the leaf directive table.
pub(crate) struct Directive {
    pub name: &'static str,
    pub markers: &'static [char],
    handler: Handler,
}

pub(crate) const DIRECTIVES: &[Directive] = &[
    Directive {
        name: "value",
        markers: &['&', ','],
        handler: value,
    },
    Directive {
        name: "text",
        markers: &['$'],
        handler: text_of,
    },
    Directive {
        name: "comment",
        markers: &['#'],
        handler: comment,
    },
    Directive {
        name: "include",
        markers: &['.'],
        handler: include,
    },
    Directive {
        name: "call",
        markers: &['^'],
        handler: call_leaf,
    },
];

/// Transform a string leaf.
pub(crate) fn scalar(
    template: &Template,
    leaf: &str,
    env: &Environment<'_>,
    flags: Flags,
) -> TemplateResult<Produced> {
    for directive in DIRECTIVES {
        if let Some(rest) = leaf.strip_prefix(directive.markers) {
            trace!(directive = directive.name, clause = rest, "directive");
            return (directive.handler)(template, rest, env, flags);
        }
    }
    let expanded = text::expand(template, leaf, env)?;
    Ok(Produced::One(Value::string(expanded)))
}

/// Split an optional interpolation `-` off the front of a clause.
pub(crate) fn split_force(rest: &str) -> (bool, &str) {
    match rest.strip_prefix('-') {
        Some(clause) => (true, clause),
        None => (false, rest),
    }
}

/// `&expr`, `,expr`: the value itself.
fn value(
    template: &Template,
    rest: &str,
    env: &Environment<'_>,
    flags: Flags,
) -> TemplateResult<Produced> {
    let (force, clause) = split_force(rest);
    let value = template.eval(clause, env)?;
    Ok(Produced::emit(value, flags.forced(force)))
}

/// `$expr`: the value's text form.
fn text_of(
    template: &Template,
    rest: &str,
    env: &Environment<'_>,
    _flags: Flags,
) -> TemplateResult<Produced> {
    let value = template.eval(rest, env)?;
    Ok(Produced::One(Value::string(value.to_text())))
}

/// `#...`: vanishes from lists, blank elsewhere; `#+` is always blank.
fn comment(
    _template: &Template,
    rest: &str,
    _env: &Environment<'_>,
    flags: Flags,
) -> TemplateResult<Produced> {
    if flags.context == Context::List && !rest.starts_with('+') {
        return Ok(Produced::Nothing);
    }
    Ok(Produced::One(Value::string("")))
}

/// `.expr`: walk the decoded file named by `expr` in the current scope.
fn include(
    template: &Template,
    rest: &str,
    env: &Environment<'_>,
    flags: Flags,
) -> TemplateResult<Produced> {
    let (force, clause) = split_force(rest);
    let file = template.eval(clause, env)?.to_text();
    template.include(&file, env, flags.forced(force))
}

/// `^expr`: call with no arguments.
fn call_leaf(
    template: &Template,
    rest: &str,
    env: &Environment<'_>,
    flags: Flags,
) -> TemplateResult<Produced> {
    let (force, clause) = split_force(rest);
    let func = template.eval_callable(clause, env)?;
    let result = call(clause, &func, &[])?;
    Ok(Produced::emit(result, flags.forced(force)))
}
