//! Implicit conversions between value variants.
//!
//! These follow the ECMAScript abstract operations of the same names
//! (ToBoolean, ToNumber, ToInt32, ToUint32, ToString, ToObject) restricted
//! to the value kinds this runtime has.

use super::{object_cell, string_text, ObjectCell, ObjectKind, Value};
use crate::errors::EvalError;
use crate::heap::{Heap, HeapRef};

const TWO_POW_32: f64 = 4_294_967_296.0;

impl Value {
    /// Truthiness.
    ///
    /// `undefined`, `false`, `0`, `-0`, `NaN` and the empty string are false;
    /// everything else, every object included, is true.
    pub fn to_boolean(self, heap: &Heap) -> Result<bool, EvalError> {
        Ok(match self {
            Value::Undefined => false,
            Value::Boolean(b) => b,
            Value::Number(n) => !(n == 0.0 || n.is_nan()),
            Value::String(handle) => !string_text(heap, handle)?.is_empty(),
            Value::Object(_) => true,
        })
    }

    /// Numeric conversion.
    pub fn to_number(self, heap: &Heap) -> Result<f64, EvalError> {
        Ok(match self {
            Value::Undefined => f64::NAN,
            Value::Boolean(b) => f64::from(u8::from(b)),
            Value::Number(n) => n,
            Value::String(handle) => string_to_number(string_text(heap, handle)?),
            Value::Object(handle) => match object_cell(heap, handle)?.kind() {
                ObjectKind::Boxed(inner) => inner.to_number(heap)?,
                ObjectKind::Ordinary | ObjectKind::Function(_) => f64::NAN,
            },
        })
    }

    /// Number, truncated and wrapped into the signed 32-bit range.
    pub fn to_int32(self, heap: &Heap) -> Result<i32, EvalError> {
        Ok(int32(self.to_number(heap)?))
    }

    /// Number, truncated and wrapped into the unsigned 32-bit range.
    pub fn to_uint32(self, heap: &Heap) -> Result<u32, EvalError> {
        Ok(uint32(self.to_number(heap)?))
    }

    /// Text form, as string concatenation sees it.
    pub fn to_display_string(self, heap: &Heap) -> Result<String, EvalError> {
        Ok(match self {
            Value::Undefined => "undefined".to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Number(n) => number_to_string(n),
            Value::String(handle) => string_text(heap, handle)?.to_string(),
            Value::Object(handle) => match object_cell(heap, handle)?.kind() {
                ObjectKind::Boxed(inner) => inner.to_display_string(heap)?,
                ObjectKind::Function(_) => "[object Function]".to_string(),
                ObjectKind::Ordinary => "[object Object]".to_string(),
            },
        })
    }

    /// Object conversion. Objects are returned unchanged; primitives are
    /// wrapped in a freshly allocated boxed object.
    pub fn to_object(self, heap: &mut Heap) -> HeapRef<ObjectCell> {
        match self {
            Value::Object(handle) => handle,
            primitive => heap.allocate(ObjectCell::boxed(primitive)),
        }
    }
}

/// ToUint32 on an already-converted number.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the wrapped value is an integer in [0, 2^32)"
)]
fn uint32(n: f64) -> u32 {
    if !n.is_finite() {
        return 0;
    }
    n.trunc().rem_euclid(TWO_POW_32) as u32
}

/// ToInt32 on an already-converted number.
fn int32(n: f64) -> i32 {
    i32::from_ne_bytes(uint32(n).to_ne_bytes())
}

/// ECMAScript StringToNumber.
///
/// Surrounding whitespace is ignored and the empty string is `0`. Accepts
/// decimal literals with optional sign and exponent, `Infinity`, and
/// `0x`/`0o`/`0b` integers. Anything else is `NaN`.
fn string_to_number(text: &str) -> f64 {
    let trimmed = text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if trimmed.is_empty() {
        return 0.0;
    }

    let (sign, unsigned) = match trimmed.as_bytes()[0] {
        b'-' => (-1.0, &trimmed[1..]),
        b'+' => (1.0, &trimmed[1..]),
        _ => (1.0, trimmed),
    };
    if unsigned == "Infinity" {
        return sign * f64::INFINITY;
    }

    // Prefixed integers take no sign.
    if sign_free(trimmed) {
        if let Some((digits, radix)) = radix_prefixed(unsigned) {
            return parse_radix(digits, radix);
        }
    }

    // `f64::from_str` also accepts "inf" and "nan"; keep to decimal syntax.
    let decimal = unsigned
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !decimal || !unsigned.bytes().next().is_some_and(|b| b.is_ascii_digit() || b == b'.') {
        return f64::NAN;
    }
    unsigned.parse::<f64>().map_or(f64::NAN, |n| sign * n)
}

fn sign_free(text: &str) -> bool {
    !text.starts_with(['+', '-'])
}

/// Split a `0x`/`0o`/`0b` prefix (either case) from its digits.
fn radix_prefixed(text: &str) -> Option<(&str, u32)> {
    [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)]
        .into_iter()
        .find_map(|(prefix, radix)| text.strip_prefix(prefix).map(|digits| (digits, radix)))
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    let mut value = 0.0_f64;
    for ch in digits.chars() {
        let Some(digit) = ch.to_digit(radix) else {
            return f64::NAN;
        };
        value = value * f64::from(radix) + f64::from(digit);
    }
    value
}

/// ECMAScript Number::toString for radix 10.
///
/// Integral values print without a fractional part, `-0` prints as `0`,
/// and magnitudes outside `[1e-6, 1e21)` use exponent notation.
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        // Display is shortest round-trip and never uses exponents.
        return n.to_string();
    }

    let formatted = format!("{n:e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted,
    }
}
