//! Stack growth guard for recursive passes.
//!
//! The parser and the compiler both recurse once per nested expression.
//! A pathological input such as `((((((...))))))` or a deeply nested chain
//! of function literals would otherwise overflow the native stack before
//! any diagnostic could be produced.
//!
//! # Platform Support
//!
//! - **Native targets**: `stacker` grows the stack on demand.
//! - **WASM targets**: plain call (WASM manages its own stack).
//!
//! The VM itself does not recurse: calls push `Frame`s onto a bounded frame
//! stack, so it needs no guard.

/// Minimum stack space to keep available before recursing (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Stack segment allocated when the red zone is hit (1MB).
const GROWTH: usize = 1024 * 1024;

/// Run `f`, first growing the native stack if less than the red zone remains.
///
/// Wrap the body of each recursive descent entry point:
///
/// ```text
/// fn compile_expr(&mut self, expr: &Expr) -> Result<(), CompileError> {
///     ensure_sufficient_stack(|| self.compile_expr_inner(expr))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, GROWTH, f)
}

/// WASM version - just call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
