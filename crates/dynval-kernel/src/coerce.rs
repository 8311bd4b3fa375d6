//! The coercion table.
//!
//! Conversions are closed and explicit: each (source kind, target kind)
//! pair below is either listed or fails with `ConvertFail`. Nothing is
//! chained through an intermediate kind.
//!
//! | source        | target            | rule                        |
//! |---------------|-------------------|-----------------------------|
//! | string        | int, int64        | parse decimal (trimmed)     |
//! | string        | bool              | boolean spellings           |
//! | string        | string            | identity                    |
//! | int, uint     | int64             | widen                       |
//! | int, uint     | string            | decimal format              |
//! | anything else | string            | best-effort format          |

use crate::config::CoercionOptions;
use crate::convert::{parse_bool, to_text};
use crate::error::{KernelError, KernelResult};
use crate::kind::BaseKind;
use crate::value::Value;
use std::fmt;

/// Targets the coercion table can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    /// Platform-width signed integer.
    Int,
    Int64,
    Bool,
    String,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int => "int",
            Self::Int64 => "int64",
            Self::Bool => "bool",
            Self::String => "string",
        };
        f.write_str(name)
    }
}

/// Coerce `value`, declared to be of `source` kind, into `target` using the
/// default options.
pub fn coerce(value: &Value, source: BaseKind, target: TargetKind) -> KernelResult<Value> {
    coerce_with(value, source, target, &CoercionOptions::default())
}

/// [`coerce`] with explicit options.
pub fn coerce_with(
    value: &Value,
    source: BaseKind,
    target: TargetKind,
    opts: &CoercionOptions,
) -> KernelResult<Value> {
    let result = match (source, target, value) {
        (BaseKind::String, TargetKind::Int, Value::Str(s)) => {
            parse_int(s, opts).and_then(|i| {
                isize::try_from(i)
                    .map(|_| Value::Int(i))
                    .map_err(|_| fail(source, target))
            })
        }
        (BaseKind::String, TargetKind::Int64, Value::Str(s)) => parse_int(s, opts).map(Value::Int),
        (BaseKind::String, TargetKind::Bool, Value::Str(s)) => parse_bool(s).map(Value::Bool),
        (BaseKind::String, TargetKind::String, Value::Str(s)) => Ok(Value::Str(s.clone())),
        (BaseKind::String, _, _) => Err(fail(source, target)),

        (BaseKind::Int | BaseKind::Uint, TargetKind::Int64, Value::Int(i)) => Ok(Value::Int(*i)),
        (BaseKind::Int | BaseKind::Uint, TargetKind::Int64, Value::Uint(u)) => i64::try_from(*u)
            .map(Value::Int)
            .map_err(|_| fail(source, target)),
        (BaseKind::Int | BaseKind::Uint, TargetKind::String, Value::Int(_) | Value::Uint(_)) => {
            Ok(Value::Str(value.to_string()))
        }
        (BaseKind::Int | BaseKind::Uint, _, _) => Err(fail(source, target)),

        (_, TargetKind::String, _) => to_text(value).map(Value::Str),
        _ => Err(fail(source, target)),
    };

    if result.is_err() {
        tracing::trace!(%source, %target, shape = %value.shape(), "coercion failed");
    }
    result
}

fn parse_int(text: &str, opts: &CoercionOptions) -> KernelResult<i64> {
    let text = if opts.trim_strings { text.trim() } else { text };
    text.parse::<i64>()
        .map_err(|_| KernelError::convert_fail("string", "int64"))
}

fn fail(source: BaseKind, target: TargetKind) -> KernelError {
    KernelError::convert_fail(source.to_string(), target.to_string())
}

/// One of the two canonical scalar representations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BasicValue {
    String(String),
    Int64(i64),
}

impl From<BasicValue> for Value {
    fn from(value: BasicValue) -> Self {
        match value {
            BasicValue::String(s) => Value::Str(s),
            BasicValue::Int64(i) => Value::Int(i),
        }
    }
}

/// Reduce a value, through any references, to a string or a 64-bit signed
/// integer. Unsigned values are widened through the signed range and fail
/// when they do not fit. Floats, bools and composites fail.
pub fn to_basic_type(value: &Value) -> KernelResult<BasicValue> {
    match value.indirect_all() {
        Value::Str(s) => Ok(BasicValue::String(s.clone())),
        Value::Int(i) => Ok(BasicValue::Int64(*i)),
        Value::Uint(u) => i64::try_from(*u)
            .map(BasicValue::Int64)
            .map_err(|_| KernelError::convert_fail("uint", "int64")),
        other => Err(KernelError::convert_fail(
            other.shape().to_string(),
            "basic",
        )),
    }
}
