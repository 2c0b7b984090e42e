//! Tree-walking interpreter for Lumen.
//!
//! # Architecture
//!
//! All evaluation goes through `evaluate(NodeId)` in `eval.rs`, an
//! exhaustive match over [`NodeKind`](lumen_ir::NodeKind). Helper modules:
//!
//! - `function_call` - the call protocol and the collection intrinsic
//! - `scope_guard` - RAII scope push/pop around blocks
//! - `builder` - construction and configuration
//!
//! # Control Flow
//!
//! Statements produce a [`Completion`]. `Return` propagates out of blocks
//! and loops untouched until the call protocol converts it back into the
//! call's value. There is no interpreter-wide "returning" flag.
//!
//! # Garbage Collection
//!
//! Collection runs when the intrinsic is called and, if configured, at
//! statement boundaries once enough allocations have accumulated. The root
//! set is:
//!
//! - the active environment
//! - every suspended caller environment
//! - the temporary-root stack, which holds values a Rust frame is still
//!   using while it evaluates another child (a binary left operand, call
//!   arguments evaluated so far, the last loop body value)

mod builder;
mod eval;
mod function_call;
mod scope_guard;

pub use builder::InterpreterBuilder;
pub use scope_guard::ScopedInterpreter;

use lumen_ir::{Ast, Name, NodeId, StringInterner};
use lumen_runtime::{CollectionReport, EvalError, Heap, Trace, Tracer, Value};

use crate::diagnostics::CallStack;
use crate::environment::Environment;
use crate::eval_config::EvalConfig;

/// Result of evaluating a statement.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Completion {
    /// Evaluation finished; control continues with the next statement.
    Normal(Value),
    /// A `return` ran; enclosing statements stop until the call boundary.
    Return(Value),
}

impl Completion {
    /// The carried value, whichever way evaluation completed.
    #[inline]
    pub fn value(self) -> Value {
        match self {
            Completion::Normal(value) | Completion::Return(value) => value,
        }
    }

    #[inline]
    pub fn is_return(self) -> bool {
        matches!(self, Completion::Return(_))
    }
}

/// Pre-interned names checked on hot paths.
///
/// Interned once at construction so call dispatch and member reads compare
/// `Name`s (`u32 == u32`) instead of strings.
#[derive(Clone, Copy)]
pub(crate) struct IntrinsicNames {
    /// Collection intrinsic (`$gc` unless configured otherwise).
    pub(crate) gc: Name,
    /// Built-in `length` property.
    pub(crate) length: Name,
}

impl IntrinsicNames {
    pub(crate) fn new(interner: &StringInterner, config: &EvalConfig) -> Self {
        Self {
            gc: interner.intern(&config.gc_intrinsic),
            length: interner.intern("length"),
        }
    }
}

/// Everything the collector must treat as live.
struct RootSet<'r> {
    env: &'r Environment,
    suspended: &'r [Environment],
    temporaries: &'r [Value],
}

impl Trace for RootSet<'_> {
    fn trace(&self, tracer: &mut dyn Tracer) {
        self.env.trace(tracer);
        for env in self.suspended {
            env.trace(tracer);
        }
        for value in self.temporaries {
            value.trace(tracer);
        }
    }
}

/// Tree-walking interpreter.
///
/// Borrows the syntax tree and interner it evaluates; owns the heap and
/// every environment.
pub struct Interpreter<'a> {
    /// String interner for name lookup.
    pub(crate) interner: &'a StringInterner,
    /// Syntax tree being evaluated. Function values refer into it by `NodeId`.
    pub(crate) ast: &'a Ast,
    /// Sole allocation authority for strings and objects.
    pub(crate) heap: Heap,
    /// Current environment.
    pub(crate) env: Environment,
    /// Caller environments of the calls in progress, outermost first.
    pub(crate) suspended: Vec<Environment>,
    /// Values held by in-progress evaluation frames.
    pub(crate) roots: Vec<Value>,
    /// Live call stack for depth limiting and backtrace capture.
    pub(crate) call_stack: CallStack,
    pub(crate) config: EvalConfig,
    pub(crate) names: IntrinsicNames,
}

impl<'a> Interpreter<'a> {
    /// Create a new interpreter with the default configuration.
    ///
    /// For more configuration options, use `InterpreterBuilder::new(interner, ast)`.
    pub fn new(interner: &'a StringInterner, ast: &'a Ast) -> Self {
        InterpreterBuilder::new(interner, ast).build()
    }

    /// Create an interpreter builder for more configuration options.
    pub fn builder(interner: &'a StringInterner, ast: &'a Ast) -> InterpreterBuilder<'a> {
        InterpreterBuilder::new(interner, ast)
    }

    /// Evaluate the tree's root program in the global scope.
    ///
    /// Returns the value of the last top-level statement, or the value of a
    /// top-level `return`.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(&mut self) -> Result<Value, EvalError> {
        self.evaluate(self.ast.root()).map(Completion::value)
    }

    /// Evaluate any node and report how it completed.
    ///
    /// Statement nodes may complete with `Return`; expression nodes always
    /// complete normally.
    pub fn evaluate(&mut self, id: NodeId) -> Result<Completion, EvalError> {
        self.eval_node(id)
    }

    /// Evaluate a node for its value.
    pub fn eval_value(&mut self, id: NodeId) -> Result<Value, EvalError> {
        self.eval_node(id).map(Completion::value)
    }

    /// Run a full collection now.
    pub fn collect_garbage(&mut self) -> CollectionReport {
        let roots = RootSet {
            env: &self.env,
            suspended: &self.suspended,
            temporaries: &self.roots,
        };
        self.heap.collect_garbage(&roots)
    }

    /// Collect if the configured allocation threshold has been reached.
    ///
    /// Called only at statement boundaries.
    pub(crate) fn maybe_collect(&mut self) {
        if self
            .config
            .should_collect(self.heap.allocations_since_collection())
        {
            self.collect_garbage();
        }
    }

    /// Hold `value` as a root while `f` runs.
    pub(crate) fn with_root<T>(
        &mut self,
        value: Value,
        f: impl FnOnce(&mut Self) -> Result<T, EvalError>,
    ) -> Result<T, EvalError> {
        self.roots.push(value);
        let result = f(self);
        self.roots.pop();
        result
    }

    /// Get the heap, e.g. to inspect its statistics or resolve a string.
    #[inline]
    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    /// Get the string interner.
    #[inline]
    pub fn interner(&self) -> &StringInterner {
        self.interner
    }

    /// Get the current environment.
    #[inline]
    pub fn env(&self) -> &Environment {
        &self.env
    }

    #[inline]
    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Read a global binding by name.
    ///
    /// Returns `None` when the name was never interned or is unbound.
    pub fn global(&self, name: &str) -> Option<Value> {
        let name = self.interner.try_intern(name).ok()?;
        self.env.lookup_global(name)
    }

    /// Display string of a value, as `+` concatenation would produce it.
    pub fn display(&self, value: Value) -> Result<String, EvalError> {
        value.to_display_string(&self.heap)
    }
}
