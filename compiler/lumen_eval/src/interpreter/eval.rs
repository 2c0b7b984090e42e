//! Node evaluation: `NodeKind` dispatch.
//!
//! # Borrow Pattern
//!
//! `NodeKind` is `Copy`, so we copy the kind out of the arena before
//! dispatching. The tree itself is borrowed for `'a`, independently of
//! `&mut self`, so child lists can be iterated while evaluating children.

use lumen_ir::{AssignmentOp, Name, NodeId, NodeKind, NodeRange};
use lumen_runtime::{
    computed_member_access, invalid_assignment_target, object_cell, redeclaration, string_text,
    unresolved_reference, EvalError, EvalResult, FunctionData, ObjectCell, ObjectKind, Value,
};
use smallvec::SmallVec;

use super::{Completion, Interpreter};
use crate::environment::ScopeKind;
use crate::stack::ensure_sufficient_stack;
use crate::{evaluate_binary, evaluate_logical, evaluate_unary};

impl Interpreter<'_> {
    /// Entry point for node evaluation with stack safety.
    #[tracing::instrument(level = "trace", skip(self))]
    pub(crate) fn eval_node(&mut self, id: NodeId) -> Result<Completion, EvalError> {
        ensure_sufficient_stack(|| self.eval_node_inner(id))
    }

    /// Handles every `NodeKind` variant exhaustively. No `_ =>` catch-all.
    fn eval_node_inner(&mut self, id: NodeId) -> Result<Completion, EvalError> {
        let kind = self.ast.kind(id);

        let value = match kind {
            // Scopes
            NodeKind::Program(statements) => return self.eval_statements(statements),
            NodeKind::Block(statements) => {
                return self.with_env_scope(ScopeKind::Block, |scoped| {
                    scoped.eval_statements(statements)
                });
            }

            // Statements
            NodeKind::FunctionDeclaration { name, params, body } => {
                let params = SmallVec::from_slice(self.ast.name_list(params));
                let function = ObjectCell::function(FunctionData { name, params, body });
                let value = Value::Object(self.heap.allocate(function));
                self.env
                    .define_function(name, value)
                    .map_err(|_| redeclaration(self.interner.lookup(name)))?;
                value
            }
            NodeKind::ExpressionStatement(expr) => self.eval_value(expr)?,
            NodeKind::ReturnStatement(argument) => {
                let value = match argument {
                    Some(argument) => self.eval_value(argument)?,
                    None => Value::Undefined,
                };
                return Ok(Completion::Return(value));
            }
            NodeKind::IfStatement {
                predicate,
                consequent,
                alternate,
            } => {
                let taken = if self.eval_value(predicate)?.to_boolean(&self.heap)? {
                    consequent
                } else {
                    alternate
                };
                return self.eval_node(taken);
            }
            NodeKind::WhileStatement { predicate, body } => {
                return self.eval_while(predicate, body);
            }
            NodeKind::VariableDeclaration {
                kind,
                name,
                initializer,
            } => {
                self.env
                    .declare(name, kind)
                    .map_err(|_| redeclaration(self.interner.lookup(name)))?;
                if let Some(initializer) = initializer {
                    let value = self.eval_value(initializer)?;
                    self.assign(name, value)?;
                }
                Value::Undefined
            }

            // Expressions
            NodeKind::CallExpression { callee, arguments } => self.eval_call(callee, arguments)?,
            NodeKind::BinaryExpression { op, lhs, rhs } => {
                let left = self.eval_value(lhs)?;
                let right = self.with_root(left, |interp| interp.eval_value(rhs))?;
                evaluate_binary(&mut self.heap, left, right, op)?
            }
            NodeKind::LogicalExpression { op, lhs, rhs } => {
                let left = self.eval_value(lhs)?;
                let right = self.with_root(left, |interp| interp.eval_value(rhs))?;
                evaluate_logical(&self.heap, left, right, op)?
            }
            NodeKind::UnaryExpression { op, operand } => {
                let operand = self.eval_value(operand)?;
                evaluate_unary(&self.heap, operand, op)?
            }
            NodeKind::AssignmentExpression { op, lhs, rhs } => match op {
                AssignmentOp::Assign => {
                    let NodeKind::Identifier(name) = self.ast.kind(lhs) else {
                        return Err(invalid_assignment_target(self.ast.kind(lhs).class_name()));
                    };
                    let value = self.eval_value(rhs)?;
                    self.assign(name, value)?;
                    value
                }
            },
            NodeKind::Identifier(name) => self
                .env
                .lookup(name)
                .ok_or_else(|| unresolved_reference(self.interner.lookup(name)))?,
            NodeKind::MemberExpression { object, property } => {
                self.eval_member(object, property)?
            }
            NodeKind::ObjectExpression => Value::object(&mut self.heap),

            // Literals
            NodeKind::StringLiteral(text) => {
                Value::string(&mut self.heap, self.interner.lookup(text))
            }
            NodeKind::NumericLiteral(bits) => Value::Number(f64::from_bits(bits)),
            NodeKind::BooleanLiteral(b) => Value::Boolean(b),
        };
        Ok(Completion::Normal(value))
    }

    /// Evaluate statements in order in the current scope.
    ///
    /// Stops at the first `Return`. Otherwise yields the last statement's
    /// value, or `undefined` for an empty list.
    pub(crate) fn eval_statements(
        &mut self,
        statements: NodeRange,
    ) -> Result<Completion, EvalError> {
        let ast = self.ast;
        let mut last = Value::Undefined;
        for &statement in ast.node_list(statements) {
            self.maybe_collect();
            match self.eval_node(statement)? {
                Completion::Normal(value) => last = value,
                ret @ Completion::Return(_) => return Ok(ret),
            }
        }
        Ok(Completion::Normal(last))
    }

    fn eval_while(&mut self, predicate: NodeId, body: NodeId) -> Result<Completion, EvalError> {
        let mut last = Value::Undefined;
        loop {
            let keep_going = self.with_root(last, |interp| {
                let test = interp.eval_value(predicate)?;
                test.to_boolean(&interp.heap)
            })?;
            if !keep_going {
                return Ok(Completion::Normal(last));
            }
            match self.eval_node(body)? {
                Completion::Normal(value) => last = value,
                ret @ Completion::Return(_) => return Ok(ret),
            }
        }
    }

    /// Store into the nearest existing binding.
    fn assign(&mut self, name: Name, value: Value) -> Result<(), EvalError> {
        self.env
            .assign(name, value)
            .map_err(|_| unresolved_reference(self.interner.lookup(name)))
    }

    /// Static property read: `object.name`.
    ///
    /// Primitives are boxed first. Absent properties read as `undefined`;
    /// `length` is built in for boxed strings (UTF-16 code units) and for
    /// functions (declared parameter count).
    fn eval_member(&mut self, object: NodeId, property: NodeId) -> EvalResult {
        let receiver = self.eval_value(object)?;
        let handle = receiver.to_object(&mut self.heap);
        let key = match self.ast.kind(property) {
            NodeKind::Identifier(name) => name,
            other => return Err(computed_member_access(other.class_name())),
        };

        let cell = object_cell(&self.heap, handle)?;
        if let Some(value) = cell.get(key) {
            return Ok(value);
        }
        if key != self.names.length {
            return Ok(Value::Undefined);
        }
        let length = match cell.kind() {
            ObjectKind::Function(function) => function.arity(),
            ObjectKind::Boxed(Value::String(text)) => {
                string_text(&self.heap, *text)?.encode_utf16().count()
            }
            ObjectKind::Boxed(_) | ObjectKind::Ordinary => return Ok(Value::Undefined),
        };
        Ok(length_value(length))
    }
}

#[expect(clippy::cast_precision_loss, reason = "lengths are far below 2^53")]
fn length_value(length: usize) -> Value {
    Value::Number(length as f64)
}
