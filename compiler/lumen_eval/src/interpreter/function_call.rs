//! Function call evaluation methods for the Interpreter.
//!
//! A call runs in a fresh environment whose only ancestor is the global
//! scope. The caller's environment is parked on `suspended` for the
//! duration so collections still see its bindings.

use lumen_ir::{DeclarationKind, Name, NodeId, NodeKind, NodeRange};
use lumen_runtime::{
    arity_mismatch, not_callable, object_cell, unresolved_reference, EvalError, EvalResult,
    FunctionData, Value,
};
use smallvec::SmallVec;

use super::{Completion, Interpreter};
use crate::diagnostics::CallFrame;

impl Interpreter<'_> {
    /// Evaluate `callee(arguments...)`.
    ///
    /// Order: intrinsic check, callee lookup, callable check, arity check,
    /// then arguments left to right in the caller's environment.
    #[tracing::instrument(level = "debug", skip_all)]
    pub(super) fn eval_call(&mut self, callee: Name, arguments: NodeRange) -> EvalResult {
        let ast = self.ast;
        let arguments = ast.node_list(arguments);
        let name = self.interner.lookup(callee);

        if callee == self.names.gc {
            if !arguments.is_empty() {
                return Err(arity_mismatch(name, 0, arguments.len()));
            }
            let report = self.collect_garbage();
            tracing::trace!(freed = report.freed, "collection intrinsic");
            return Ok(Value::Undefined);
        }

        let target = self
            .env
            .lookup(callee)
            .ok_or_else(|| unresolved_reference(name))?;
        let function = self.resolve_function(name, target)?;
        if arguments.len() != function.arity() {
            return Err(arity_mismatch(name, function.arity(), arguments.len()));
        }

        let args = self.eval_arguments(arguments)?;
        self.call_function(&function, &args)
    }

    /// The function data behind `target`, copied out of the heap.
    fn resolve_function(&self, name: &str, target: Value) -> Result<FunctionData, EvalError> {
        if let Value::Object(handle) = target {
            if let Some(function) = object_cell(&self.heap, handle)?.as_function() {
                return Ok(function.clone());
            }
        }
        Err(not_callable(name, target.type_of(&self.heap)))
    }

    /// Evaluate arguments left to right, rooting each until all are done.
    fn eval_arguments(&mut self, arguments: &[NodeId]) -> Result<SmallVec<[Value; 4]>, EvalError> {
        let mark = self.roots.len();
        let evaluated: Result<(), EvalError> = arguments.iter().try_for_each(|&argument| {
            let value = self.eval_value(argument)?;
            self.roots.push(value);
            Ok(())
        });
        let values = self.roots.drain(mark..).collect();
        evaluated.map(|()| values)
    }

    /// Bind `args` to the parameters of `function` and run its body.
    ///
    /// Returns the body's completion value: the `return` value if one ran,
    /// otherwise the value of the last statement.
    pub(crate) fn call_function(&mut self, function: &FunctionData, args: &[Value]) -> EvalResult {
        self.call_stack.push(CallFrame {
            name: function.name,
        })?;

        let mut callee_env = self.env.child();
        for (&param, &arg) in function.params.iter().zip(args) {
            callee_env.define(param, arg, DeclarationKind::Var);
        }
        let caller_env = std::mem::replace(&mut self.env, callee_env);
        self.suspended.push(caller_env);

        let result = self.eval_body(function.body);

        if let Some(caller_env) = self.suspended.pop() {
            self.env = caller_env;
        }
        let result = result.map_err(|err| self.call_stack.attach_backtrace(err, self.interner));
        self.call_stack.pop();
        result.map(Completion::value)
    }

    /// Run a function body directly in the call's function scope.
    fn eval_body(&mut self, body: NodeId) -> Result<Completion, EvalError> {
        match self.ast.kind(body) {
            NodeKind::Block(statements) => self.eval_statements(statements),
            _ => self.eval_node(body),
        }
    }
}
