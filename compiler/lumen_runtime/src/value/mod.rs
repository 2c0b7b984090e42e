//! Runtime values.
//!
//! [`Value`] is `Copy`: primitives are stored inline and strings/objects are
//! heap handles. Only the `String` and `Object` variants reference heap
//! memory; everything that reads through them needs the [`Heap`].
//!
//! Coercions live in `coerce.rs` and the operator table in `operators.rs`.

mod cells;
mod coerce;
mod operators;

pub use cells::{FunctionData, ObjectCell, ObjectKind, StringCell};
pub use coerce::number_to_string;
pub use operators::{
    add, bitwise_and, bitwise_not, bitwise_or, bitwise_xor, greater_than, left_shift, less_than,
    right_shift, sub, typed_eq, typed_not_eq,
};

use crate::errors::{stale_reference, EvalError};
use crate::heap::{Heap, HeapRef, Trace, Tracer};

/// A runtime value.
///
/// The derived `PartialEq` is strict equality: same variant, IEEE-754
/// equality for numbers, handle identity for strings and objects.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Undefined,
    Boolean(bool),
    Number(f64),
    String(HeapRef<StringCell>),
    Object(HeapRef<ObjectCell>),
}

impl Value {
    /// Allocate a heap string.
    pub fn string(heap: &mut Heap, text: impl Into<String>) -> Self {
        Value::String(heap.allocate(StringCell::new(text)))
    }

    /// Allocate a fresh empty object.
    pub fn object(heap: &mut Heap) -> Self {
        Value::Object(heap.allocate(ObjectCell::ordinary()))
    }

    /// `typeof`-style name, used in error messages.
    pub fn type_of(self, heap: &Heap) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Object(handle) => match heap.get(handle).map(ObjectCell::kind) {
                Some(ObjectKind::Function(_)) => "function",
                _ => "object",
            },
        }
    }
}

impl Trace for Value {
    fn trace(&self, tracer: &mut dyn Tracer) {
        match self {
            Value::String(handle) => handle.trace(tracer),
            Value::Object(handle) => handle.trace(tracer),
            Value::Undefined | Value::Boolean(_) | Value::Number(_) => {}
        }
    }
}

/// Resolve a string handle or fail with `StaleReference`.
pub fn string_text(heap: &Heap, handle: HeapRef<StringCell>) -> Result<&str, EvalError> {
    heap.get(handle)
        .map(StringCell::as_str)
        .ok_or_else(stale_reference)
}

/// Resolve an object handle or fail with `StaleReference`.
pub fn object_cell(heap: &Heap, handle: HeapRef<ObjectCell>) -> Result<&ObjectCell, EvalError> {
    heap.get(handle).ok_or_else(stale_reference)
}
