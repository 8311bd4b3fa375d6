//! Best-effort numeric and string conversions.
//!
//! These are the building blocks the comparator and the coercion table
//! lean on. Each one accepts any value and either produces the target
//! representation or a `ConvertFail`.

use crate::config::CoercionOptions;
use crate::error::{KernelError, KernelResult};
use crate::value::Value;

fn numeric_text<'a>(text: &'a str, opts: &CoercionOptions) -> &'a str {
    if opts.trim_strings { text.trim() } else { text }
}

/// Convert to a 64-bit signed integer.
///
/// Floats truncate toward zero. Unsigned values above `i64::MAX` fail
/// instead of wrapping. In strict mode strings and floats are refused.
pub fn to_int64(value: &Value, opts: &CoercionOptions) -> KernelResult<i64> {
    let fail = || KernelError::convert_fail(value.shape().to_string(), "int64");
    match value {
        Value::Int(i) => Ok(*i),
        Value::Uint(u) => i64::try_from(*u).map_err(|_| fail()),
        Value::Str(_) | Value::Float(_) | Value::Float32(_) if opts.strict_numeric => Err(fail()),
        Value::Str(s) => numeric_text(s, opts).parse::<i64>().map_err(|_| fail()),
        Value::Float(f) => truncate(*f).ok_or_else(fail),
        Value::Float32(f) => truncate(f64::from(*f)).ok_or_else(fail),
        _ => Err(fail()),
    }
}

fn truncate(f: f64) -> Option<i64> {
    let truncated = f.trunc();
    (truncated.is_finite() && truncated >= i64::MIN as f64 && truncated < i64::MAX as f64)
        .then_some(truncated as i64)
}

/// Convert to a 64-bit float.
pub fn to_float(value: &Value, opts: &CoercionOptions) -> KernelResult<f64> {
    match value {
        Value::Float(f) => Ok(*f),
        Value::Float32(f) => Ok(f64::from(*f)),
        Value::Int(i) => Ok(*i as f64),
        Value::Uint(u) => Ok(*u as f64),
        Value::Str(s) => numeric_text(s, opts)
            .parse::<f64>()
            .map_err(|_| KernelError::convert_fail("string", "float64")),
        other => Err(KernelError::convert_fail(
            other.shape().to_string(),
            "float64",
        )),
    }
}

/// Parse one of the accepted boolean spellings (case-insensitive):
/// `1`, `on`, `yes`, `true` and `0`, `off`, `no`, `false`.
pub fn parse_bool(text: &str) -> KernelResult<bool> {
    match text.to_lowercase().as_str() {
        "1" | "on" | "yes" | "true" => Ok(true),
        "0" | "off" | "no" | "false" => Ok(false),
        _ => Err(KernelError::convert_fail("string", "bool")),
    }
}

/// Render a basic value as text. An unset value renders as the empty
/// string; composite shapes fail.
pub fn to_text(value: &Value) -> KernelResult<String> {
    match value {
        Value::Invalid => Ok(String::new()),
        Value::Str(s) => Ok(s.clone()),
        Value::Bool(_)
        | Value::Int(_)
        | Value::Uint(_)
        | Value::Float(_)
        | Value::Float32(_)
        | Value::Complex(_) => Ok(value.to_string()),
        other => Err(KernelError::convert_fail(other.shape().to_string(), "string")),
    }
}
