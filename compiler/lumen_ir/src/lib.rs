//! Lumen IR - syntax tree types consumed by the evaluator
//!
//! This crate contains the data the interpreter walks:
//! - Names for interned identifiers and literal text
//! - A closed set of syntax tree node kinds
//! - Flat arena storage with construction-time validation
//! - A diagnostic tree dump
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: Strings → Name(u32)
//! - **Flatten Everything**: No `Box<Node>`, use NodeId(u32) indices
//! - **Validate Once**: shape defects are rejected by `AstBuilder::finish`,
//!   so the evaluator never meets a malformed tree
//!
//! Numeric literals store their `f64` as `u64` bits so node kinds stay `Eq`.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-copied types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
pub mod ast;
mod dump;
mod interner;
mod name;
mod node_id;

pub use arena::{Ast, AstBuilder, AstError};
pub use ast::{AssignmentOp, BinaryOp, DeclarationKind, LogicalOp, NodeKind, UnaryOp};
pub use dump::dump;
pub use interner::{InternError, StringInterner};
pub use name::Name;
pub use node_id::{NameRange, NodeId, NodeRange};

static_assert_size!(Name, 4);
static_assert_size!(NodeId, 4);
