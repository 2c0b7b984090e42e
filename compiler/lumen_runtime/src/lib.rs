#![allow(
    clippy::result_large_err,
    reason = "EvalError is fundamental; boxing would add complexity across the evaluator"
)]
//! Lumen Runtime - values, heap and errors for the Lumen interpreter.
//!
//! This crate provides:
//! - Runtime values (`Value`) and their ECMAScript-style coercions
//! - The operator table (`add`, `sub`, `typed_eq`, bitwise operators, ...)
//! - The garbage-collected `Heap` and generation-checked `HeapRef<T>` handles
//! - Evaluation error types (`EvalError`, `EvalResult`)
//!
//! # Heap Discipline
//!
//! `Heap::allocate` is the only way to create strings and objects. The heap
//! never guesses at liveness: callers pass their root set to
//! `Heap::collect_garbage` through the `Trace` trait. A handle whose cell was
//! swept never resolves again, and value operations report that as
//! `EvalErrorKind::StaleReference` rather than reading recycled memory.

mod errors;
mod heap;
mod value;

pub use errors::{
    BacktraceFrame, ErrorCategory, EvalBacktrace, EvalError, EvalErrorKind, EvalResult,
};
pub use heap::{CollectionReport, Heap, HeapCell, HeapRef, HeapStats, RawRef, Trace, Tracer};
pub use value::{
    number_to_string, object_cell, string_text, FunctionData, ObjectCell, ObjectKind, StringCell,
    Value,
};

// Operator table
pub use value::{
    add, bitwise_and, bitwise_not, bitwise_or, bitwise_xor, greater_than, left_shift, less_than,
    right_shift, sub, typed_eq, typed_not_eq,
};

// Re-export error constructors for use by the evaluator
pub use errors::{
    arity_mismatch, computed_member_access, invalid_assignment_target, not_callable,
    redeclaration, stack_overflow, stale_reference, unresolved_reference,
};
