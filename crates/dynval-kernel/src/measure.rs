//! Emptiness and length.
//!
//! Length has one deliberately unusual rule: a number's length is the
//! count of characters in its decimal rendering, so `12345` has length 5.
//! Min/max length rules rely on this for numeric fields.

use crate::value::Value;

/// Whether `value` is the empty value for its shape.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Invalid => true,
        Value::Str(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Slice(items) => items.as_ref().is_none_or(Vec::is_empty),
        Value::Map(map) => map.as_ref().is_none_or(|m| m.is_empty()),
        Value::Bool(b) => !b,
        Value::Int(i) => *i == 0,
        Value::Uint(u) => *u == 0,
        Value::Float(_) | Value::Float32(_) => value.as_f64() == Some(0.0),
        Value::Pointer(inner) => inner.is_none(),
        other => other.is_zero(),
    }
}

/// Canonical length of `value`, or `-1` when its shape has none.
///
/// Strings count Unicode code points; containers count elements; numbers
/// count the characters of their base-10 rendering (sign included). One
/// level of reference is followed first.
pub fn length(value: &Value) -> i64 {
    let count = match value.indirect() {
        Value::Str(s) => s.chars().count(),
        Value::Array(items) => items.len(),
        Value::Slice(items) | Value::Chan(items) => items.as_ref().map_or(0, Vec::len),
        Value::Map(map) => map.as_ref().map_or(0, |m| m.len()),
        Value::Int(i) => i.to_string().len(),
        Value::Uint(u) => u.to_string().len(),
        float @ (Value::Float(_) | Value::Float32(_)) => float.to_string().len(),
        _ => return -1,
    };
    i64::try_from(count).unwrap_or(i64::MAX)
}
