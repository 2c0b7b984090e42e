//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use lumen_ir::{Ast, StringInterner};
use lumen_runtime::Heap;

use super::{IntrinsicNames, Interpreter};
use crate::diagnostics::CallStack;
use crate::environment::Environment;
use crate::eval_config::EvalConfig;

/// Builder for creating Interpreter instances with various configurations.
///
/// ```ignore
/// let mut interpreter = Interpreter::builder(&interner, &ast)
///     .max_call_depth(Some(64))
///     .gc_threshold(None)
///     .build();
/// ```
pub struct InterpreterBuilder<'a> {
    interner: &'a StringInterner,
    ast: &'a Ast,
    config: EvalConfig,
    heap: Option<Heap>,
}

impl<'a> InterpreterBuilder<'a> {
    /// Create a new builder with the default configuration.
    pub fn new(interner: &'a StringInterner, ast: &'a Ast) -> Self {
        Self {
            interner,
            ast,
            config: EvalConfig::default(),
            heap: None,
        }
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the call depth limit (`None` for unlimited).
    #[must_use]
    pub fn max_call_depth(mut self, depth: Option<usize>) -> Self {
        self.config.max_call_depth = depth;
        self
    }

    /// Set the automatic collection threshold (`None` disables automatic collection).
    #[must_use]
    pub fn gc_threshold(mut self, threshold: Option<usize>) -> Self {
        self.config.gc_threshold = threshold;
        self
    }

    /// Rename the collection intrinsic.
    #[must_use]
    pub fn gc_intrinsic(mut self, name: impl Into<String>) -> Self {
        self.config.gc_intrinsic = name.into();
        self
    }

    /// Evaluate against an existing heap instead of a fresh one.
    ///
    /// Handles into a reused heap stay valid only while something roots
    /// them; the new interpreter starts with an empty environment.
    #[must_use]
    pub fn heap(mut self, heap: Heap) -> Self {
        self.heap = Some(heap);
        self
    }

    /// Build the interpreter.
    pub fn build(self) -> Interpreter<'a> {
        let names = IntrinsicNames::new(self.interner, &self.config);
        Interpreter {
            interner: self.interner,
            ast: self.ast,
            heap: self.heap.unwrap_or_default(),
            env: Environment::new(),
            suspended: Vec::new(),
            roots: Vec::new(),
            call_stack: CallStack::new(self.config.max_call_depth),
            config: self.config,
            names,
        }
    }
}
