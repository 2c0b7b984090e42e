//! Operator and declaration-kind enums carried by syntax tree nodes.

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,

    // Comparison
    TypedEq,
    TypedNotEq,
    Gt,
    Lt,

    // Bitwise
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
}

impl BinaryOp {
    /// Returns the source-level symbol for this operator.
    ///
    /// Used by the tree dump and in error messages.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::TypedEq => "===",
            Self::TypedNotEq => "!==",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::Shl => "<<",
            Self::Shr => ">>",
        }
    }
}

/// Logical operators.
///
/// Both operands are always evaluated; see the evaluator's `LogicalExpression`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::And => "&&",
            Self::Or => "||",
        }
    }
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    BitNot,
    Not,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::BitNot => "~",
            Self::Not => "!",
        }
    }
}

/// Assignment operators. Only plain `=` exists today.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum AssignmentOp {
    Assign,
}

impl AssignmentOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Assign => "=",
        }
    }
}

/// How a variable declaration binds its name.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DeclarationKind {
    /// `var` - hoisted to the nearest function or global scope.
    Var,
    /// `let` - bound in the innermost scope.
    Let,
}

impl DeclarationKind {
    /// Keyword label used by the tree dump.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Var => "Var",
            Self::Let => "Let",
        }
    }
}
