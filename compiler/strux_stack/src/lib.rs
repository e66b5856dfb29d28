//! Stack growth guard for deeply nested templates and expressions.
//!
//! Templates are arbitrary user data: a list nested ten thousand levels deep
//! is a valid template, and so is `!!!!...!x`. The parser, the evaluator and
//! the template walker all recurse on that structure, so each recursive entry
//! point runs inside [`ensure_sufficient_stack`].
//!
//! On native targets the `stacker` crate allocates a fresh segment when the
//! remaining stack drops below [`RED_ZONE`]. On `wasm32` the guard is a plain
//! call.

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each freshly allocated stack segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, growing the stack first if less than [`RED_ZONE`] remains.
///
/// ```text
/// fn walk(&self, node: &Value) -> Result<Produced, TemplateError> {
///     ensure_sufficient_stack(|| self.walk_inner(node))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack; call through.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nesting_depth(levels: u32) -> u32 {
        ensure_sufficient_stack(|| {
            if levels == 0 {
                0
            } else {
                nesting_depth(levels - 1) + 1
            }
        })
    }

    #[test]
    fn test_passes_result_through() {
        let result: Result<&str, ()> = ensure_sufficient_stack(|| Ok("done"));
        assert_eq!(result, Ok("done"));
    }

    #[test]
    fn test_deep_nesting_survives() {
        // Deeper than a default 8MB main-thread stack allows unguarded.
        assert_eq!(nesting_depth(200_000), 200_000);
    }
}
