//! Evaluation tests over hand-built syntax trees.
//!
//! `Script` wraps an `AstBuilder` and a `StringInterner` so tests can spell
//! programs by name instead of juggling interned ids.

mod control_tests;

use lumen_ir::{Ast, AstBuilder, BinaryOp, DeclarationKind, LogicalOp, NodeId, StringInterner};

use crate::{EvalError, Interpreter, InterpreterBuilder, Value};

pub(crate) struct Script {
    pub(crate) interner: StringInterner,
    pub(crate) b: AstBuilder,
}

impl Script {
    pub(crate) fn new() -> Self {
        Self {
            interner: StringInterner::new(),
            b: AstBuilder::new(),
        }
    }

    pub(crate) fn ident(&mut self, name: &str) -> NodeId {
        let name = self.interner.intern(name);
        self.b.identifier(name)
    }

    pub(crate) fn num(&mut self, value: f64) -> NodeId {
        self.b.number(value)
    }

    pub(crate) fn str(&mut self, text: &str) -> NodeId {
        let text = self.interner.intern(text);
        self.b.string(text)
    }

    pub(crate) fn bool(&mut self, value: bool) -> NodeId {
        self.b.boolean(value)
    }

    pub(crate) fn binary(&mut self, op: BinaryOp, lhs: NodeId, rhs: NodeId) -> NodeId {
        self.b.binary(op, lhs, rhs)
    }

    pub(crate) fn logical(&mut self, op: LogicalOp, lhs: NodeId, rhs: NodeId) -> NodeId {
        self.b.logical(op, lhs, rhs)
    }

    pub(crate) fn call(&mut self, callee: &str, arguments: &[NodeId]) -> NodeId {
        let callee = self.interner.intern(callee);
        self.b.call(callee, arguments)
    }

    /// `name = rhs` as an expression.
    pub(crate) fn assign(&mut self, name: &str, rhs: NodeId) -> NodeId {
        let lhs = self.ident(name);
        self.b.assignment(lhs, rhs)
    }

    /// `object.property`.
    pub(crate) fn member(&mut self, object: NodeId, property: &str) -> NodeId {
        let property = self.ident(property);
        self.b.member(object, property)
    }

    /// Wrap an expression as a statement.
    pub(crate) fn stmt(&mut self, expr: NodeId) -> NodeId {
        self.b.expression_statement(expr)
    }

    pub(crate) fn let_(&mut self, name: &str, initializer: Option<NodeId>) -> NodeId {
        let name = self.interner.intern(name);
        self.b.variable_declaration(DeclarationKind::Let, name, initializer)
    }

    pub(crate) fn var(&mut self, name: &str, initializer: Option<NodeId>) -> NodeId {
        let name = self.interner.intern(name);
        self.b.variable_declaration(DeclarationKind::Var, name, initializer)
    }

    pub(crate) fn ret(&mut self, argument: Option<NodeId>) -> NodeId {
        self.b.return_statement(argument)
    }

    pub(crate) fn block(&mut self, statements: &[NodeId]) -> NodeId {
        self.b.block(statements)
    }

    pub(crate) fn if_else(
        &mut self,
        predicate: NodeId,
        then: &[NodeId],
        otherwise: &[NodeId],
    ) -> NodeId {
        let consequent = self.b.block(then);
        let alternate = self.b.block(otherwise);
        self.b.if_statement(predicate, consequent, alternate)
    }

    pub(crate) fn while_(&mut self, predicate: NodeId, body: &[NodeId]) -> NodeId {
        let body = self.b.block(body);
        self.b.while_statement(predicate, body)
    }

    pub(crate) fn function(&mut self, name: &str, params: &[&str], body: &[NodeId]) -> NodeId {
        let name = self.interner.intern(name);
        let params: Vec<_> = params.iter().map(|p| self.interner.intern(p)).collect();
        let body = self.b.block(body);
        self.b.function_declaration(name, &params, body)
    }

    /// Finish with a program of `statements` as the root.
    pub(crate) fn finish(mut self, statements: &[NodeId]) -> (StringInterner, Ast) {
        let root = self.b.program(statements);
        let ast = self.b.finish(root).unwrap();
        (self.interner, ast)
    }
}

/// Run a finished script with the default configuration.
pub(crate) fn run(interner: &StringInterner, ast: &Ast) -> Result<Value, EvalError> {
    Interpreter::new(interner, ast).run()
}

/// Run a finished script with automatic collection disabled.
pub(crate) fn run_without_auto_gc(
    interner: &StringInterner,
    ast: &Ast,
) -> Result<Value, EvalError> {
    InterpreterBuilder::new(interner, ast)
        .gc_threshold(None)
        .build()
        .run()
}
