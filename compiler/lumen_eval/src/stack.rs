//! Native stack growth for the evaluator.
//!
//! `Interpreter::eval_node` recurses once per level of syntax tree nesting,
//! and an interpreted call adds a few more levels (call, body block, return
//! argument). Neither is bounded by the host stack: the tree can be nested
//! arbitrarily deep, and the call depth limit is configurable or off. Every
//! node evaluation therefore runs through [`ensure_sufficient_stack`], which
//! grows the stack onto the heap before it runs out. The call depth limit
//! stays the only thing that stops runaway recursion, and it reports it as
//! `StackOverflow` instead of aborting the process.
//!
//! wasm32 has no `stacker` support; there the closure runs directly.

/// Headroom kept free below the current frame before growing.
#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated stack segment.
#[cfg(not(target_arch = "wasm32"))]
const SEGMENT: usize = 1024 * 1024;

/// Run `f`, first growing the native stack if less than the red zone is left.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
