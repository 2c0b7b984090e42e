#![allow(
    clippy::result_large_err,
    reason = "EvalError is fundamental; boxing would add complexity across the evaluator"
)]
//! Lumen Eval - tree-walking evaluator for Lumen syntax trees.
//!
//! # Architecture
//!
//! The evaluator uses:
//! - `Environment`: variable scoping with a scope stack of `Global`,
//!   `Function` and `Block` scopes
//! - `evaluate_binary` / `evaluate_logical`: direct enum-based operator dispatch
//! - `evaluate_unary`: direct enum-based unary dispatch
//! - `Interpreter`: node evaluation, the call protocol and the GC root set
//! - `Value`, `Heap` and `EvalError` from `lumen_runtime`
//!
//! # Example
//!
//! ```ignore
//! let interner = StringInterner::new();
//! let mut b = AstBuilder::new();
//! let one = b.number(1.0);
//! let two = b.number(2.0);
//! let sum = b.binary(BinaryOp::Add, one, two);
//! let statement = b.expression_statement(sum);
//! let root = b.program(&[statement]);
//! let ast = b.finish(root)?;
//!
//! let mut interpreter = Interpreter::new(&interner, &ast);
//! assert_eq!(interpreter.run()?, Value::Number(3.0));
//! ```

mod diagnostics;
mod environment;
mod eval_config;
pub mod interpreter;
mod operators;
mod stack;
mod unary_operators;

// Re-export value types from lumen_runtime
pub use lumen_runtime::{
    CollectionReport, ErrorCategory, EvalBacktrace, EvalError, EvalErrorKind, EvalResult, Heap,
    HeapStats, Value,
};

pub use diagnostics::{CallFrame, CallStack};
pub use environment::{AssignError, DeclareError, Environment, LocalScope, Scope, ScopeKind};
pub use eval_config::{
    EvalConfig, DEFAULT_GC_INTRINSIC, DEFAULT_GC_THRESHOLD, DEFAULT_MAX_CALL_DEPTH,
};
pub use interpreter::{Completion, Interpreter, InterpreterBuilder, ScopedInterpreter};
pub use operators::{evaluate_binary, evaluate_logical};
pub use stack::ensure_sufficient_stack;
pub use unary_operators::evaluate_unary;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set, e.g.
/// `RUST_LOG=lumen_eval=debug` for calls or `lumen_eval=trace` for every node.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

#[cfg(test)]
mod tests;
