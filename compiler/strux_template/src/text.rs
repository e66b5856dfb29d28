//! Inline markers in literal text.
//!
//! `{$expr}` is replaced by the text form of `expr`. `{#...}` is removed
//! along with the whitespace after it, and `{#-...}` takes the whitespace on
//! both sides with it. A marker without a closing `}` is left as written.

use strux_eval::Environment;

use crate::{Template, TemplateResult};

pub(crate) fn expand(template: &Template, text: &str, env: &Environment<'_>) -> TemplateResult<String> {
    if !text.contains('{') {
        return Ok(text.to_string());
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let close = after.find('}');
        match (after.as_bytes().first(), close) {
            (Some(b'$'), Some(close)) => {
                out.push_str(&rest[..open]);
                let value = template.eval(&after[1..close], env)?;
                out.push_str(&value.to_text());
                rest = &after[close + 1..];
            }
            (Some(b'#'), Some(close)) => {
                out.push_str(&rest[..open]);
                if after[1..].starts_with('-') {
                    let kept = out.trim_end().len();
                    out.truncate(kept);
                }
                rest = after[close + 1..].trim_start();
            }
            _ => {
                out.push_str(&rest[..=open]);
                rest = after;
            }
        }
    }
    out.push_str(rest);
    Ok(out)
}
