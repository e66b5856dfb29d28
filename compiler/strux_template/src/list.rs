//! List nodes: loops, conditionals and the marker fold.
//!
//! The first element decides what a list means. `@clause` repeats the rest
//! of the list once per element of `clause`; `?clause` picks one of the next
//! two elements. Any other list is folded left to right by [`ListFold`],
//! which honors structural markers on string elements in every position.
//! A `-` on a `//`, `/` or `^` marker in the first position splices the
//! whole list into its parent.

use strux_eval::{Environment, Value};
use strux_value::Callable;
use tracing::{debug, trace};

use crate::directive::split_force;
use crate::produced::{Flags, Produced};
use crate::template::call;
use crate::{Template, TemplateError, TemplateResult};

pub(crate) fn walk_list(
    template: &Template,
    items: &[Value],
    env: &Environment<'_>,
    flags: Flags,
) -> TemplateResult<Produced> {
    let Some((head, body)) = items.split_first() else {
        return Ok(Produced::emit(Value::list(Vec::new()), flags));
    };

    match head.as_str() {
        Some(text) if text.starts_with('@') => {
            let (force, clause) = split_force(&text[1..]);
            let out = repeat(template, clause, body, env)?;
            Ok(Produced::emit(Value::list(out), flags.forced(force)))
        }
        Some(text) if text.starts_with('?') => {
            let (force, clause) = split_force(&text[1..]);
            let chosen = if template.eval(clause, env)?.is_truthy() {
                body.first()
            } else {
                body.get(1)
            };
            trace!(clause, taken = chosen.is_some(), "list conditional");
            match chosen {
                Some(branch) => template.walk(branch, env, flags.forced(force)),
                None => Ok(Produced::Nothing),
            }
        }
        _ => {
            let (out, force) = fold(template, items, env)?;
            Ok(Produced::emit(Value::list(out), flags.forced(force)))
        }
    }
}

/// `@clause`: fold `body` once per element in a child scope.
fn repeat(
    template: &Template,
    clause: &str,
    body: &[Value],
    env: &Environment<'_>,
) -> TemplateResult<Vec<Value>> {
    let elements = match template.eval(clause, env)? {
        Value::Null => return Ok(Vec::new()),
        Value::List(elements) => elements,
        other => {
            return Err(TemplateError::LoopType {
                clause: clause.to_string(),
                found: other.type_name(),
            })
        }
    };
    debug!(clause, iterations = elements.len(), "loop");

    let mut out = Vec::new();
    for element in elements.iter() {
        let scope = Environment::from_value(element, Some(env));
        let (items, _) = fold(template, body, &scope)?;
        out.extend(items);
    }
    Ok(out)
}

/// Fold plain list elements, applying structural markers.
///
/// Also reports whether the first element forces the whole list to splice.
fn fold(
    template: &Template,
    items: &[Value],
    env: &Environment<'_>,
) -> TemplateResult<(Vec<Value>, bool)> {
    let force = items
        .first()
        .and_then(Value::as_str)
        .and_then(Marker::parse)
        .is_some_and(Marker::forces_node);

    let mut state = ListFold::default();
    for item in items {
        if state.skip_next {
            state.skip_next = false;
            continue;
        }
        match item.as_str().and_then(Marker::parse) {
            Some(Marker::Stop { .. }) => break,
            Some(Marker::Skip { .. }) => state.skip_next = true,
            Some(Marker::Capture { clause, force }) => {
                let func = template.eval_callable(clause, env)?;
                state.capture(clause, func, force)?;
            }
            Some(Marker::InterpolateNext) => state.interpolate_next = true,
            None => {
                let flags = Flags::LIST.forced(std::mem::take(&mut state.interpolate_next));
                let produced = template.walk(item, env, flags)?;
                state.push(produced)?;
            }
        }
    }
    Ok((state.finish()?, force))
}

/// Structural marker on a list element.
///
/// Any string element of a plain list that starts with `/`, `^` or `<` is a
/// marker, never data: `"/usr/bin"` skips the element after it. Data strings
/// with these leading characters have to be produced by an expression such
/// as `&'/usr/bin'`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Marker<'a> {
    /// `//`: drop the rest of the list.
    Stop { force: bool },
    /// `/`: drop the next element.
    Skip { force: bool },
    /// `^clause`: pass the next element's result to a callable.
    Capture { clause: &'a str, force: bool },
    /// `<`: interpolate the next element.
    InterpolateNext,
}

impl<'a> Marker<'a> {
    /// Markers are checked in the order `//`, `/`, `^`, `<`.
    pub fn parse(text: &'a str) -> Option<Marker<'a>> {
        if let Some(rest) = text.strip_prefix("//") {
            Some(Marker::Stop {
                force: rest.starts_with('-'),
            })
        } else if let Some(rest) = text.strip_prefix('/') {
            Some(Marker::Skip {
                force: rest.starts_with('-'),
            })
        } else if let Some(rest) = text.strip_prefix('^') {
            let (force, clause) = split_force(rest);
            Some(Marker::Capture { clause, force })
        } else if text.starts_with('<') {
            Some(Marker::InterpolateNext)
        } else {
            None
        }
    }

    /// Whether this marker, in the first position, splices the whole list.
    pub fn forces_node(self) -> bool {
        match self {
            Marker::Stop { force } | Marker::Skip { force } | Marker::Capture { force, .. } => {
                force
            }
            Marker::InterpolateNext => false,
        }
    }
}

/// A capture waiting for the next element.
#[derive(Debug)]
pub(crate) struct Capture {
    clause: String,
    func: Callable,
    force: bool,
}

/// State carried across the elements of one list.
#[derive(Debug, Default)]
pub(crate) struct ListFold {
    pub skip_next: bool,
    pub interpolate_next: bool,
    pending: Option<Capture>,
    out: Vec<Value>,
}

impl ListFold {
    /// Start a capture. One already pending is called with no arguments.
    pub fn capture(&mut self, clause: &str, func: Callable, force: bool) -> TemplateResult<()> {
        self.flush()?;
        self.pending = Some(Capture {
            clause: clause.to_string(),
            func,
            force,
        });
        Ok(())
    }

    /// Accept one element's result, feeding it to a pending capture.
    pub fn push(&mut self, produced: Produced) -> TemplateResult<()> {
        match self.pending.take() {
            Some(capture) => {
                let result = call(&capture.clause, &capture.func, &produced.into_args())?;
                Produced::emit(result, Flags::LIST.forced(capture.force)).extend_into(&mut self.out);
            }
            None => produced.extend_into(&mut self.out),
        }
        Ok(())
    }

    /// Collected elements, after calling any capture left pending.
    pub fn finish(mut self) -> TemplateResult<Vec<Value>> {
        self.flush()?;
        Ok(self.out)
    }

    fn flush(&mut self) -> TemplateResult<()> {
        if let Some(capture) = self.pending.take() {
            let result = call(&capture.clause, &capture.func, &[])?;
            Produced::emit(result, Flags::LIST.forced(capture.force)).extend_into(&mut self.out);
        }
        Ok(())
    }
}
