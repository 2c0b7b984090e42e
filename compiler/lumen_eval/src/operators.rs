//! Binary and logical operator dispatch for the evaluator.
//!
//! Provides direct enum-based dispatch onto the operator table in
//! `lumen_runtime`. The operator set is closed, so pattern matching is
//! preferred over trait objects.

use lumen_ir::{BinaryOp, LogicalOp};
use lumen_runtime::{
    add, bitwise_and, bitwise_or, bitwise_xor, greater_than, left_shift, less_than, right_shift,
    sub, typed_eq, typed_not_eq, EvalResult, Heap, Value,
};

/// Evaluate a binary operation on two already-evaluated operands.
///
/// Only `+` may allocate (string concatenation), which is why the heap is
/// borrowed mutably.
pub fn evaluate_binary(heap: &mut Heap, left: Value, right: Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => add(heap, left, right),
        BinaryOp::Sub => sub(heap, left, right),
        BinaryOp::TypedEq => Ok(typed_eq(left, right)),
        BinaryOp::TypedNotEq => Ok(typed_not_eq(left, right)),
        BinaryOp::Gt => greater_than(heap, left, right),
        BinaryOp::Lt => less_than(heap, left, right),
        BinaryOp::BitAnd => bitwise_and(heap, left, right),
        BinaryOp::BitOr => bitwise_or(heap, left, right),
        BinaryOp::BitXor => bitwise_xor(heap, left, right),
        BinaryOp::Shl => left_shift(heap, left, right),
        BinaryOp::Shr => right_shift(heap, left, right),
    }
}

/// Evaluate a logical operation on two already-evaluated operands.
///
/// Both operands have been evaluated by the time this runs; the result is
/// always a `Boolean`, never one of the operands.
pub fn evaluate_logical(heap: &Heap, left: Value, right: Value, op: LogicalOp) -> EvalResult {
    let left = left.to_boolean(heap)?;
    let right = right.to_boolean(heap)?;
    let result = match op {
        LogicalOp::And => left && right,
        LogicalOp::Or => left || right,
    };
    Ok(Value::Boolean(result))
}
