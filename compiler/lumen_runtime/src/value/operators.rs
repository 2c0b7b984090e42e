//! The value-level operator table.
//!
//! `add` concatenates when either operand is a string and otherwise adds
//! numerically. Every other arithmetic, relational and bitwise operator
//! coerces both operands to numbers first; bitwise operators further wrap
//! them to 32-bit integers. `typed_eq` never coerces.

use super::Value;
use crate::errors::EvalResult;
use crate::heap::Heap;

/// Shift counts use only their low five bits.
const SHIFT_MASK: u32 = 0x1f;

pub fn add(heap: &mut Heap, lhs: Value, rhs: Value) -> EvalResult {
    if matches!(lhs, Value::String(_)) || matches!(rhs, Value::String(_)) {
        let mut text = lhs.to_display_string(heap)?;
        text.push_str(&rhs.to_display_string(heap)?);
        return Ok(Value::string(heap, text));
    }
    Ok(Value::Number(lhs.to_number(heap)? + rhs.to_number(heap)?))
}

pub fn sub(heap: &Heap, lhs: Value, rhs: Value) -> EvalResult {
    Ok(Value::Number(lhs.to_number(heap)? - rhs.to_number(heap)?))
}

/// Strict equality: same variant and same value, no coercion.
#[inline]
pub fn typed_eq(lhs: Value, rhs: Value) -> Value {
    Value::Boolean(lhs == rhs)
}

#[inline]
pub fn typed_not_eq(lhs: Value, rhs: Value) -> Value {
    Value::Boolean(lhs != rhs)
}

/// Numeric `>`. Any `NaN` operand makes the comparison false.
pub fn greater_than(heap: &Heap, lhs: Value, rhs: Value) -> EvalResult {
    Ok(Value::Boolean(lhs.to_number(heap)? > rhs.to_number(heap)?))
}

/// Numeric `<`. Any `NaN` operand makes the comparison false.
pub fn less_than(heap: &Heap, lhs: Value, rhs: Value) -> EvalResult {
    Ok(Value::Boolean(lhs.to_number(heap)? < rhs.to_number(heap)?))
}

pub fn bitwise_and(heap: &Heap, lhs: Value, rhs: Value) -> EvalResult {
    Ok(int32_result(lhs.to_int32(heap)? & rhs.to_int32(heap)?))
}

pub fn bitwise_or(heap: &Heap, lhs: Value, rhs: Value) -> EvalResult {
    Ok(int32_result(lhs.to_int32(heap)? | rhs.to_int32(heap)?))
}

pub fn bitwise_xor(heap: &Heap, lhs: Value, rhs: Value) -> EvalResult {
    Ok(int32_result(lhs.to_int32(heap)? ^ rhs.to_int32(heap)?))
}

pub fn left_shift(heap: &Heap, lhs: Value, rhs: Value) -> EvalResult {
    let value = lhs.to_int32(heap)?;
    let count = rhs.to_uint32(heap)? & SHIFT_MASK;
    Ok(int32_result(value.wrapping_shl(count)))
}

/// Sign-propagating `>>`.
pub fn right_shift(heap: &Heap, lhs: Value, rhs: Value) -> EvalResult {
    let value = lhs.to_int32(heap)?;
    let count = rhs.to_uint32(heap)? & SHIFT_MASK;
    Ok(int32_result(value >> count))
}

pub fn bitwise_not(heap: &Heap, operand: Value) -> EvalResult {
    Ok(int32_result(!operand.to_int32(heap)?))
}

#[inline]
fn int32_result(n: i32) -> Value {
    Value::Number(f64::from(n))
}
