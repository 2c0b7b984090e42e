//! Evaluation limits and hooks for the Lumen interpreter.
//!
//! `EvalConfig` is passed to `InterpreterBuilder::config`. Every field has a
//! default that suits running scripts; tests typically lower the limits to
//! exercise them.

/// Default call depth limit.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1024;

/// Default number of allocations between automatic collections.
pub const DEFAULT_GC_THRESHOLD: usize = 4096;

/// Default name of the collection intrinsic.
pub const DEFAULT_GC_INTRINSIC: &str = "$gc";

/// Interpreter policy knobs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalConfig {
    /// Maximum number of nested calls, or `None` for unlimited.
    ///
    /// Native stack growth (`stacker`) keeps deep recursion from crashing
    /// the process; this limit turns runaway recursion into an error.
    pub max_call_depth: Option<usize>,
    /// Allocations since the last collection that trigger a collection at
    /// the next statement boundary, or `None` to collect only on request.
    pub gc_threshold: Option<usize>,
    /// Call name that forces a collection instead of a function call.
    pub gc_intrinsic: String,
}

impl EvalConfig {
    /// Whether `allocations` pending allocations warrant an automatic collection.
    #[inline]
    pub fn should_collect(&self, allocations: usize) -> bool {
        self.gc_threshold
            .is_some_and(|threshold| allocations >= threshold)
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            max_call_depth: Some(DEFAULT_MAX_CALL_DEPTH),
            gc_threshold: Some(DEFAULT_GC_THRESHOLD),
            gc_intrinsic: DEFAULT_GC_INTRINSIC.to_string(),
        }
    }
}
