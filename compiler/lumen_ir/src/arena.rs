//! Flat syntax tree arena and its builder.
//!
//! [`AstBuilder`] is the only way to produce an [`Ast`]. Children must be
//! built before their parents, so every child ID is smaller than its parent's
//! ID and the finished tree is acyclic by construction. [`AstBuilder::finish`]
//! checks the shape invariants the evaluator relies on, so malformed trees are
//! rejected before evaluation ever starts.
//!
//! # Index Spaces
//!
//! - `nodes`: indexed by [`NodeId`]
//! - `node_lists`: flat `Vec<NodeId>` indexed by [`NodeRange`] (statements, arguments)
//! - `name_lists`: flat `Vec<Name>` indexed by [`NameRange`] (parameter names)

use std::fmt;

use crate::ast::{AssignmentOp, BinaryOp, DeclarationKind, LogicalOp, NodeKind, UnaryOp};
use crate::{Name, NameRange, NodeId, NodeRange};

/// Convert an arena length to `u32`.
///
/// # Panics
/// Panics if `len` exceeds `u32::MAX`.
#[inline]
pub(crate) fn to_u32(len: usize, what: &str) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("too many {what}: {len} exceeds u32::MAX"))
}

/// Convert a list length to `u16`.
///
/// # Panics
/// Panics if `len` exceeds `u16::MAX`.
#[inline]
pub(crate) fn to_u16(len: usize, what: &str) -> u16 {
    u16::try_from(len).unwrap_or_else(|_| panic!("{what} too long: {len} exceeds u16::MAX"))
}

/// Shape violation found while finishing a tree.
///
/// These indicate a defect in whatever produced the tree, not a runtime
/// condition of the program being evaluated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AstError {
    /// A child ID does not refer to a node built before its parent.
    DanglingChild { parent: NodeId, child: NodeId },
    /// A slot that must hold a `Block` holds something else.
    ExpectedBlock {
        parent: NodeId,
        child: NodeId,
        found: &'static str,
    },
    /// A value slot holds a statement.
    ExpectedExpression {
        parent: NodeId,
        child: NodeId,
        found: &'static str,
    },
    /// A statement, argument or parameter list reaches past the stored lists.
    DanglingList { node: NodeId, start: u32, len: u16 },
    /// A `Program` node appears below the root.
    NestedProgram { node: NodeId },
    /// The root is not a `Program`.
    RootNotProgram { root: NodeId, found: &'static str },
}

impl fmt::Display for AstError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingChild { parent, child } => {
                write!(f, "{parent:?} refers to {child:?}, which is not built before it")
            }
            Self::ExpectedBlock {
                parent,
                child,
                found,
            } => write!(f, "{parent:?} expects a block at {child:?}, found {found}"),
            Self::ExpectedExpression {
                parent,
                child,
                found,
            } => write!(f, "{parent:?} expects an expression at {child:?}, found {found}"),
            Self::DanglingList { node, start, len } => {
                write!(
                    f,
                    "{node:?} refers to {len} list entries from {start}, past the end of the lists"
                )
            }
            Self::NestedProgram { node } => {
                write!(f, "Program {node:?} may only appear as the tree root")
            }
            Self::RootNotProgram { root, found } => {
                write!(f, "tree root {root:?} must be a Program, found {found}")
            }
        }
    }
}

impl std::error::Error for AstError {}

/// Immutable, validated syntax tree.
///
/// Function values refer to their bodies by [`NodeId`], so an `Ast` must
/// outlive every interpreter evaluating it.
#[derive(Clone, Debug)]
pub struct Ast {
    nodes: Vec<NodeKind>,
    node_lists: Vec<NodeId>,
    name_lists: Vec<Name>,
    root: NodeId,
}

impl Ast {
    /// The `Program` node at the root of the tree.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get the kind of a node.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this tree.
    #[inline]
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.nodes[id.index()]
    }

    /// Get the kind of a node, or `None` for a foreign ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<NodeKind> {
        self.nodes.get(id.index()).copied()
    }

    /// Children referenced by a `NodeRange`.
    #[inline]
    pub fn node_list(&self, range: NodeRange) -> &[NodeId] {
        &self.node_lists[range.bounds()]
    }

    /// Names referenced by a `NameRange`.
    #[inline]
    pub fn name_list(&self, range: NameRange) -> &[Name] {
        &self.name_lists[range.bounds()]
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree has no nodes (never true for a finished tree).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Builder for [`Ast`]. Nodes are appended bottom-up.
#[derive(Default)]
pub struct AstBuilder {
    nodes: Vec<NodeKind>,
    node_lists: Vec<NodeId>,
    name_lists: Vec<Name>,
}

impl AstBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node, returning its ID.
    pub fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::new(to_u32(self.nodes.len(), "syntax tree nodes"));
        self.nodes.push(kind);
        id
    }

    fn push_node_list(&mut self, ids: &[NodeId]) -> NodeRange {
        if ids.is_empty() {
            return NodeRange::EMPTY;
        }
        let start = to_u32(self.node_lists.len(), "node list entries");
        self.node_lists.extend_from_slice(ids);
        NodeRange::new(start, to_u16(ids.len(), "node list"))
    }

    fn push_name_list(&mut self, names: &[Name]) -> NameRange {
        if names.is_empty() {
            return NameRange::EMPTY;
        }
        let start = to_u32(self.name_lists.len(), "name list entries");
        self.name_lists.extend_from_slice(names);
        NameRange::new(start, to_u16(names.len(), "parameter list"))
    }

    pub fn program(&mut self, statements: &[NodeId]) -> NodeId {
        let range = self.push_node_list(statements);
        self.push(NodeKind::Program(range))
    }

    pub fn block(&mut self, statements: &[NodeId]) -> NodeId {
        let range = self.push_node_list(statements);
        self.push(NodeKind::Block(range))
    }

    pub fn function_declaration(&mut self, name: Name, params: &[Name], body: NodeId) -> NodeId {
        let params = self.push_name_list(params);
        self.push(NodeKind::FunctionDeclaration { name, params, body })
    }

    pub fn expression_statement(&mut self, expr: NodeId) -> NodeId {
        self.push(NodeKind::ExpressionStatement(expr))
    }

    pub fn return_statement(&mut self, argument: Option<NodeId>) -> NodeId {
        self.push(NodeKind::ReturnStatement(argument))
    }

    pub fn if_statement(
        &mut self,
        predicate: NodeId,
        consequent: NodeId,
        alternate: NodeId,
    ) -> NodeId {
        self.push(NodeKind::IfStatement {
            predicate,
            consequent,
            alternate,
        })
    }

    pub fn while_statement(&mut self, predicate: NodeId, body: NodeId) -> NodeId {
        self.push(NodeKind::WhileStatement { predicate, body })
    }

    pub fn variable_declaration(
        &mut self,
        kind: DeclarationKind,
        name: Name,
        initializer: Option<NodeId>,
    ) -> NodeId {
        self.push(NodeKind::VariableDeclaration {
            kind,
            name,
            initializer,
        })
    }

    pub fn call(&mut self, callee: Name, arguments: &[NodeId]) -> NodeId {
        let arguments = self.push_node_list(arguments);
        self.push(NodeKind::CallExpression { callee, arguments })
    }

    pub fn binary(&mut self, op: BinaryOp, lhs: NodeId, rhs: NodeId) -> NodeId {
        self.push(NodeKind::BinaryExpression { op, lhs, rhs })
    }

    pub fn logical(&mut self, op: LogicalOp, lhs: NodeId, rhs: NodeId) -> NodeId {
        self.push(NodeKind::LogicalExpression { op, lhs, rhs })
    }

    pub fn unary(&mut self, op: UnaryOp, operand: NodeId) -> NodeId {
        self.push(NodeKind::UnaryExpression { op, operand })
    }

    pub fn assignment(&mut self, lhs: NodeId, rhs: NodeId) -> NodeId {
        self.push(NodeKind::AssignmentExpression {
            op: AssignmentOp::Assign,
            lhs,
            rhs,
        })
    }

    pub fn identifier(&mut self, name: Name) -> NodeId {
        self.push(NodeKind::Identifier(name))
    }

    pub fn member(&mut self, object: NodeId, property: NodeId) -> NodeId {
        self.push(NodeKind::MemberExpression { object, property })
    }

    pub fn object(&mut self) -> NodeId {
        self.push(NodeKind::ObjectExpression)
    }

    pub fn string(&mut self, text: Name) -> NodeId {
        self.push(NodeKind::StringLiteral(text))
    }

    pub fn number(&mut self, value: f64) -> NodeId {
        self.push(NodeKind::NumericLiteral(value.to_bits()))
    }

    pub fn boolean(&mut self, value: bool) -> NodeId {
        self.push(NodeKind::BooleanLiteral(value))
    }

    /// Validate the tree rooted at `root` and freeze it.
    pub fn finish(self, root: NodeId) -> Result<Ast, AstError> {
        let ast = Ast {
            nodes: self.nodes,
            node_lists: self.node_lists,
            name_lists: self.name_lists,
            root,
        };
        validate(&ast)?;
        Ok(ast)
    }
}

/// Check every shape invariant of a finished tree.
fn validate(ast: &Ast) -> Result<(), AstError> {
    match ast.get(ast.root) {
        Some(NodeKind::Program(_)) => {}
        Some(other) => {
            return Err(AstError::RootNotProgram {
                root: ast.root,
                found: other.class_name(),
            })
        }
        None => {
            return Err(AstError::RootNotProgram {
                root: ast.root,
                found: "nothing",
            })
        }
    }

    for (index, kind) in ast.nodes.iter().enumerate() {
        let parent = NodeId::new(to_u32(index, "syntax tree nodes"));
        let check = Checker { ast, parent };
        match *kind {
            NodeKind::Program(range) => {
                if parent != ast.root {
                    return Err(AstError::NestedProgram { node: parent });
                }
                check.statements(range)?;
            }
            NodeKind::Block(range) => check.statements(range)?,
            NodeKind::FunctionDeclaration { params, body, .. } => {
                check.names(params)?;
                check.block(body)?;
            }
            NodeKind::ExpressionStatement(expr) => check.expression(expr)?,
            NodeKind::ReturnStatement(argument) => {
                if let Some(argument) = argument {
                    check.expression(argument)?;
                }
            }
            NodeKind::IfStatement {
                predicate,
                consequent,
                alternate,
            } => {
                check.expression(predicate)?;
                check.block(consequent)?;
                check.block(alternate)?;
            }
            NodeKind::WhileStatement { predicate, body } => {
                check.expression(predicate)?;
                check.block(body)?;
            }
            NodeKind::VariableDeclaration { initializer, .. } => {
                if let Some(initializer) = initializer {
                    check.expression(initializer)?;
                }
            }
            NodeKind::CallExpression { arguments, .. } => {
                for &argument in check.nodes(arguments)? {
                    check.expression(argument)?;
                }
            }
            NodeKind::BinaryExpression { lhs, rhs, .. }
            | NodeKind::LogicalExpression { lhs, rhs, .. }
            | NodeKind::AssignmentExpression { lhs, rhs, .. } => {
                check.expression(lhs)?;
                check.expression(rhs)?;
            }
            NodeKind::UnaryExpression { operand, .. } => check.expression(operand)?,
            NodeKind::MemberExpression { object, property } => {
                check.expression(object)?;
                check.expression(property)?;
            }
            NodeKind::Identifier(_)
            | NodeKind::ObjectExpression
            | NodeKind::StringLiteral(_)
            | NodeKind::NumericLiteral(_)
            | NodeKind::BooleanLiteral(_) => {}
        }
    }
    Ok(())
}

struct Checker<'a> {
    ast: &'a Ast,
    parent: NodeId,
}

impl<'a> Checker<'a> {
    fn child(&self, child: NodeId) -> Result<NodeKind, AstError> {
        if child >= self.parent {
            return Err(AstError::DanglingChild {
                parent: self.parent,
                child,
            });
        }
        self.ast.get(child).ok_or(AstError::DanglingChild {
            parent: self.parent,
            child,
        })
    }

    fn nodes(&self, range: NodeRange) -> Result<&'a [NodeId], AstError> {
        self.ast
            .node_lists
            .get(range.bounds())
            .ok_or(AstError::DanglingList {
                node: self.parent,
                start: range.start,
                len: range.len,
            })
    }

    fn names(&self, range: NameRange) -> Result<(), AstError> {
        match self.ast.name_lists.get(range.bounds()) {
            Some(_) => Ok(()),
            None => Err(AstError::DanglingList {
                node: self.parent,
                start: range.start,
                len: range.len,
            }),
        }
    }

    fn statements(&self, range: NodeRange) -> Result<(), AstError> {
        for &statement in self.nodes(range)? {
            self.child(statement)?;
        }
        Ok(())
    }

    fn block(&self, child: NodeId) -> Result<(), AstError> {
        match self.child(child)? {
            NodeKind::Block(_) => Ok(()),
            other => Err(AstError::ExpectedBlock {
                parent: self.parent,
                child,
                found: other.class_name(),
            }),
        }
    }

    fn expression(&self, child: NodeId) -> Result<(), AstError> {
        let kind = self.child(child)?;
        if kind.is_expression() {
            Ok(())
        } else {
            Err(AstError::ExpectedExpression {
                parent: self.parent,
                child,
                found: kind.class_name(),
            })
        }
    }
}

#[cfg(test)]
mod tests;
