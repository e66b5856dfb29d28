//! Strux Template - structural templates over [`Value`] trees.
//!
//! A template is an ordinary value. Marker characters at the front of string
//! leaves, list heads and mapping keys turn nodes into directives:
//!
//! | Where | Marker | Meaning |
//! |-------|--------|---------|
//! | leaf | `&expr`, `,expr` | value of `expr` |
//! | leaf | `$expr` | text of `expr` |
//! | leaf | `#...` | comment |
//! | leaf | `.expr` | include the file named by `expr` |
//! | leaf | `^expr` | call `expr` with no arguments |
//! | leaf | `{$expr}`, `{#...}` | inline text and comment |
//! | list head | `@expr` | repeat the rest per element |
//! | list head | `?expr` | pick the next or the one after |
//! | list element | `//`, `/`, `^expr`, `<` | stop, skip next, capture next, splice next |
//! | key | `%expr` | build a mapping per entry |
//! | key | `?expr` | switch on the value of `expr` |
//! | key | `<`, `/`, `^expr` | merge, comment, merge a call result |
//!
//! A `-` right after `&`, `.`, `^`, `@` or `?` splices a produced list into
//! the enclosing list instead of nesting it.
//!
//! Clauses are evaluated with `strux_eval` against a chain of
//! [`Environment`](strux_eval::Environment) frames: loops and hash constructs
//! push a child frame per iteration.

mod codec;
mod directive;
mod errors;
mod list;
mod loader;
mod mapping;
mod produced;
mod template;
mod text;

pub use codec::{from_json, to_json, Codec, CodecError, JsonCodec};
pub use errors::{TemplateError, TemplateResult};
pub use loader::{FsLoader, Loader, MemoryLoader};
pub use template::{Template, TemplateBuilder};

pub use strux_eval::{Environment, EvalError, Mapping, Value};
