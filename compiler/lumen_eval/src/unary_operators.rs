//! Unary operator implementations for the evaluator.

use lumen_ir::UnaryOp;
use lumen_runtime::{bitwise_not, EvalResult, Heap, Value};

/// Evaluate a unary operation using direct pattern matching.
pub fn evaluate_unary(heap: &Heap, operand: Value, op: UnaryOp) -> EvalResult {
    match op {
        UnaryOp::BitNot => bitwise_not(heap, operand),
        UnaryOp::Not => Ok(Value::Boolean(!operand.to_boolean(heap)?)),
    }
}
