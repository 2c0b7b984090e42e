//! Syntax tree node kinds.
//!
//! The node set is closed: evaluation and dumping match on [`NodeKind`]
//! exhaustively, so adding a variant is a compile error everywhere it must
//! be handled.
//!
//! `NodeKind` is `Copy`. Evaluators copy the kind out of the arena before
//! dispatching, which releases the arena borrow for recursive calls.

mod operators;

pub use operators::{AssignmentOp, BinaryOp, DeclarationKind, LogicalOp, UnaryOp};

use crate::{Name, NameRange, NodeId, NodeRange};

/// A syntax tree node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    // Scopes
    /// Root statement list. Only valid as the tree root.
    Program(NodeRange),
    /// Braced statement list.
    Block(NodeRange),

    // Statements
    FunctionDeclaration {
        name: Name,
        params: NameRange,
        /// Always a `Block`.
        body: NodeId,
    },
    ExpressionStatement(NodeId),
    ReturnStatement(Option<NodeId>),
    IfStatement {
        predicate: NodeId,
        consequent: NodeId,
        /// Mandatory; an absent `else` is an empty `Block`.
        alternate: NodeId,
    },
    WhileStatement {
        predicate: NodeId,
        body: NodeId,
    },
    VariableDeclaration {
        kind: DeclarationKind,
        name: Name,
        initializer: Option<NodeId>,
    },

    // Expressions
    CallExpression {
        callee: Name,
        arguments: NodeRange,
    },
    BinaryExpression {
        op: BinaryOp,
        lhs: NodeId,
        rhs: NodeId,
    },
    LogicalExpression {
        op: LogicalOp,
        lhs: NodeId,
        rhs: NodeId,
    },
    UnaryExpression {
        op: UnaryOp,
        operand: NodeId,
    },
    AssignmentExpression {
        op: AssignmentOp,
        lhs: NodeId,
        rhs: NodeId,
    },
    Identifier(Name),
    MemberExpression {
        object: NodeId,
        property: NodeId,
    },
    ObjectExpression,

    // Literals
    StringLiteral(Name),
    /// `f64` stored as bits so the kind stays `Eq`-friendly.
    NumericLiteral(u64),
    BooleanLiteral(bool),
}

impl NodeKind {
    /// Node class name, as printed by the tree dump.
    pub const fn class_name(&self) -> &'static str {
        match self {
            Self::Program(_) => "Program",
            Self::Block(_) => "BlockStatement",
            Self::FunctionDeclaration { .. } => "FunctionDeclaration",
            Self::ExpressionStatement(_) => "ExpressionStatement",
            Self::ReturnStatement(_) => "ReturnStatement",
            Self::IfStatement { .. } => "IfStatement",
            Self::WhileStatement { .. } => "WhileStatement",
            Self::VariableDeclaration { .. } => "VariableDeclaration",
            Self::CallExpression { .. } => "CallExpression",
            Self::BinaryExpression { .. } => "BinaryExpression",
            Self::LogicalExpression { .. } => "LogicalExpression",
            Self::UnaryExpression { .. } => "UnaryExpression",
            Self::AssignmentExpression { .. } => "AssignmentExpression",
            Self::Identifier(_) => "Identifier",
            Self::MemberExpression { .. } => "MemberExpression",
            Self::ObjectExpression => "ObjectExpression",
            Self::StringLiteral(_) => "StringLiteral",
            Self::NumericLiteral(_) => "NumericLiteral",
            Self::BooleanLiteral(_) => "BooleanLiteral",
        }
    }

    /// Whether this node may appear where a value is expected.
    pub const fn is_expression(&self) -> bool {
        matches!(
            self,
            Self::CallExpression { .. }
                | Self::BinaryExpression { .. }
                | Self::LogicalExpression { .. }
                | Self::UnaryExpression { .. }
                | Self::AssignmentExpression { .. }
                | Self::Identifier(_)
                | Self::MemberExpression { .. }
                | Self::ObjectExpression
                | Self::StringLiteral(_)
                | Self::NumericLiteral(_)
                | Self::BooleanLiteral(_)
        )
    }

    /// Numeric literal payload, if this is a `NumericLiteral`.
    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::NumericLiteral(bits) => Some(f64::from_bits(*bits)),
            _ => None,
        }
    }
}
