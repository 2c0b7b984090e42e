//! Indented textual rendering of a syntax tree.
//!
//! One node per line, two spaces per depth level. Nodes carry their
//! operator, name or literal annotation on the same line or on an extra
//! line one level deeper:
//!
//! ```text
//! Program
//!   FunctionDeclaration 'add(a,b)'
//!     BlockStatement
//!       ReturnStatement
//!         BinaryExpression
//!           Identifier "a"
//!           +
//!           Identifier "b"
//! ```
//!
//! Purely diagnostic. Nothing in evaluation reads this output.

use std::fmt::Write;

use crate::ast::NodeKind;
use crate::{Ast, NodeId, StringInterner};

/// Render the subtree rooted at `node`.
pub fn dump(ast: &Ast, interner: &StringInterner, node: NodeId) -> String {
    let mut dumper = Dumper {
        ast,
        interner,
        out: String::new(),
    };
    dumper.node(node, 0);
    dumper.out
}

struct Dumper<'a> {
    ast: &'a Ast,
    interner: &'a StringInterner,
    out: String,
}

impl Dumper<'_> {
    fn line(&mut self, indent: usize, text: &str) {
        for _ in 0..indent {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn node(&mut self, id: NodeId, indent: usize) {
        let ast = self.ast;
        let interner = self.interner;
        let Some(kind) = ast.get(id) else {
            self.line(indent, "<invalid>");
            return;
        };
        let class = kind.class_name();
        match kind {
            NodeKind::Program(range) | NodeKind::Block(range) => {
                self.line(indent, class);
                for &child in ast.node_list(range) {
                    self.node(child, indent + 1);
                }
            }
            NodeKind::FunctionDeclaration { name, params, body } => {
                let params = ast
                    .name_list(params)
                    .iter()
                    .map(|&p| interner.lookup(p))
                    .collect::<Vec<_>>()
                    .join(",");
                let header = format!("{class} '{}({params})'", interner.lookup(name));
                self.line(indent, &header);
                self.node(body, indent + 1);
            }
            NodeKind::ExpressionStatement(expr) => {
                self.line(indent, class);
                self.node(expr, indent + 1);
            }
            NodeKind::ReturnStatement(argument) => {
                self.line(indent, class);
                if let Some(argument) = argument {
                    self.node(argument, indent + 1);
                }
            }
            NodeKind::IfStatement {
                predicate,
                consequent,
                alternate,
            } => {
                self.line(indent, class);
                self.line(indent, "If");
                self.node(predicate, indent + 1);
                self.node(consequent, indent + 1);
                self.line(indent, "Else");
                self.node(alternate, indent + 1);
            }
            NodeKind::WhileStatement { predicate, body } => {
                self.line(indent, class);
                self.line(indent, "While");
                self.node(predicate, indent + 1);
                self.node(body, indent + 1);
            }
            NodeKind::VariableDeclaration {
                kind,
                name,
                initializer,
            } => {
                self.line(indent, class);
                self.line(indent + 1, kind.label());
                self.identifier(name, indent + 1);
                if let Some(initializer) = initializer {
                    self.node(initializer, indent + 1);
                }
            }
            NodeKind::CallExpression { callee, arguments } => {
                let header = format!("{class} '{}'", interner.lookup(callee));
                self.line(indent, &header);
                for &argument in ast.node_list(arguments) {
                    self.node(argument, indent + 1);
                }
            }
            NodeKind::BinaryExpression { op, lhs, rhs } => {
                self.infix(class, op.as_symbol(), lhs, rhs, indent);
            }
            NodeKind::LogicalExpression { op, lhs, rhs } => {
                self.infix(class, op.as_symbol(), lhs, rhs, indent);
            }
            NodeKind::UnaryExpression { op, operand } => {
                self.line(indent, class);
                self.line(indent + 1, op.as_symbol());
                self.node(operand, indent + 1);
            }
            NodeKind::AssignmentExpression { op, lhs, rhs } => {
                self.line(indent, class);
                self.line(indent + 1, op.as_symbol());
                self.node(lhs, indent + 1);
                self.node(rhs, indent + 1);
            }
            NodeKind::Identifier(name) => self.identifier(name, indent),
            NodeKind::MemberExpression { object, property } => {
                self.line(indent, class);
                self.node(object, indent + 1);
                self.node(property, indent + 1);
            }
            NodeKind::ObjectExpression => self.line(indent, class),
            NodeKind::StringLiteral(text) => {
                let text = format!("{class} \"{}\"", interner.lookup(text));
                self.line(indent, &text);
            }
            NodeKind::NumericLiteral(bits) => {
                let mut text = format!("{class} ");
                write_number(&mut text, f64::from_bits(bits));
                self.line(indent, &text);
            }
            NodeKind::BooleanLiteral(value) => {
                let text = format!("{class} {value}");
                self.line(indent, &text);
            }
        }
    }

    fn infix(&mut self, class: &str, symbol: &str, lhs: NodeId, rhs: NodeId, indent: usize) {
        self.line(indent, class);
        self.node(lhs, indent + 1);
        self.line(indent + 1, symbol);
        self.node(rhs, indent + 1);
    }

    fn identifier(&mut self, name: crate::Name, indent: usize) {
        let text = format!("Identifier \"{}\"", self.interner.lookup(name));
        self.line(indent, &text);
    }
}

fn write_number(out: &mut String, value: f64) {
    // `f64`'s Display already drops a trailing `.0`; only infinities differ.
    let _ = if value.is_infinite() {
        out.write_str(if value > 0.0 { "Infinity" } else { "-Infinity" })
    } else {
        write!(out, "{value}")
    };
}

#[cfg(test)]
mod tests;
