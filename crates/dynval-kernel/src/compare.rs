//! Ordered comparison and equality across heterogeneous values.
//!
//! Ordering is used inside boolean rule predicates, so "cannot compare"
//! collapses to `false`. Equality distinguishes the two outcomes: a kind
//! mismatch is simply unequal, while a composite operand is an error.

use crate::config::CoercionOptions;
use crate::convert::{to_float, to_int64};
use crate::error::{KernelError, KernelResult};
use crate::kind::{BaseKind, classify};
use crate::value::Value;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// One of the four supported orderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOp {
    Lt,
    Lte,
    Gt,
    Gte,
}

impl ComparisonOp {
    /// Whether `lhs op rhs` holds. Incomparable operands (NaN) never hold.
    pub fn holds<T: PartialOrd>(self, lhs: T, rhs: T) -> bool {
        match self {
            Self::Lt => lhs < rhs,
            Self::Lte => lhs <= rhs,
            Self::Gt => lhs > rhs,
            Self::Gte => lhs >= rhs,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Gt => "gt",
            Self::Gte => "gte",
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComparisonOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lt" => Ok(Self::Lt),
            "lte" => Ok(Self::Lte),
            "gt" => Ok(Self::Gt),
            "gte" => Ok(Self::Gte),
            _ => Err(format!("unknown comparison op: {s}")),
        }
    }
}

/// Numeric comparison `a op b`.
///
/// When either operand is a float both are compared as 64-bit floats;
/// otherwise both are compared as 64-bit signed integers. Unset operands
/// and failed conversions yield `false`.
pub fn compare(a: &Value, b: &Value, op: ComparisonOp) -> bool {
    if !a.is_valid() || !b.is_valid() {
        return false;
    }

    let opts = CoercionOptions::default();
    let either_float = BaseKind::of(a) == BaseKind::Float || BaseKind::of(b) == BaseKind::Float;
    if either_float {
        return match (to_float(a, &opts), to_float(b, &opts)) {
            (Ok(lhs), Ok(rhs)) => op.holds(lhs, rhs),
            _ => false,
        };
    }

    match (to_int64(a, &opts), to_int64(b, &opts)) {
        (Ok(lhs), Ok(rhs)) => op.holds(lhs, rhs),
        _ => false,
    }
}

/// Size comparison `a op b`.
///
/// Two strings compare by code-point length. A string against anything
/// else is `false`. Every other pair compares as 64-bit integers.
pub fn compare_size(a: &Value, b: &Value, op: ComparisonOp) -> bool {
    let opts = CoercionOptions::default();
    let (lhs, rhs) = match (a, b) {
        (Value::Str(lhs), Value::Str(rhs)) => (char_count(lhs), char_count(rhs)),
        (Value::Str(_), _) => return false,
        _ => match (to_int64(a, &opts), to_int64(b, &opts)) {
            (Ok(lhs), Ok(rhs)) => (lhs, rhs),
            _ => return false,
        },
    };
    op.holds(lhs, rhs)
}

fn char_count(text: &str) -> i64 {
    i64::try_from(text.chars().count()).unwrap_or(i64::MAX)
}

/// [`compare`] with the operator given by name (`lt`, `lte`, `gt`, `gte`).
/// Any other name yields `false`.
pub fn compare_named(a: &Value, b: &Value, op: &str) -> bool {
    op.parse::<ComparisonOp>()
        .is_ok_and(|op| compare(a, b, op))
}

/// An integer with its signedness kept explicit.
///
/// The single promotion rule: a signed value equals an unsigned one only
/// when it is non-negative and has the same magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Integer {
    Signed(i64),
    Unsigned(u64),
}

impl Integer {
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(i) => Some(Self::Signed(*i)),
            Value::Uint(u) => Some(Self::Unsigned(*u)),
            _ => None,
        }
    }

    /// Sign-aware equality.
    pub fn same(self, other: Self) -> bool {
        self.cmp_magnitude(other) == Ordering::Equal
    }

    /// Sign-aware total ordering.
    pub fn cmp_magnitude(self, other: Self) -> Ordering {
        match (self, other) {
            (Self::Signed(a), Self::Signed(b)) => a.cmp(&b),
            (Self::Unsigned(a), Self::Unsigned(b)) => a.cmp(&b),
            (Self::Signed(a), Self::Unsigned(b)) => match u64::try_from(a) {
                Ok(a) => a.cmp(&b),
                Err(_) => Ordering::Less,
            },
            (Self::Unsigned(_), Self::Signed(_)) => other.cmp_magnitude(self).reverse(),
        }
    }
}

/// Equality `a == b`.
///
/// Both operands must classify to a base kind, otherwise
/// `BadComparisonType`. Matching kinds compare natively; mismatched kinds
/// are unequal except for the signed/unsigned integer pair.
pub fn equals(a: &Value, b: &Value) -> KernelResult<bool> {
    let ka = classify(a).map_err(|_| KernelError::BadComparisonType)?;
    let kb = classify(b).map_err(|_| KernelError::BadComparisonType)?;

    if ka != kb {
        if ka.is_integer()
            && kb.is_integer()
            && let (Some(lhs), Some(rhs)) = (Integer::from_value(a), Integer::from_value(b))
        {
            return Ok(lhs.same(rhs));
        }
        return Ok(false);
    }

    let truth = match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::Uint(x), Value::Uint(y)) => x == y,
        (x, y) if ka == BaseKind::Float => x.as_f64() == y.as_f64(),
        (Value::Complex(x), Value::Complex(y)) => x == y,
        (Value::Str(x), Value::Str(y)) => x == y,
        _ => false,
    };
    Ok(truth)
}

/// [`equals`] with errors folded into `false`.
pub fn is_equal(a: &Value, b: &Value) -> bool {
    equals(a, b).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Complex;

    #[test]
    fn integer_orderings() {
        let (three, five) = (Value::from(3), Value::from(5));
        assert!(compare(&three, &five, ComparisonOp::Lt));
        assert!(compare(&five, &five, ComparisonOp::Lte));
        assert!(compare(&five, &three, ComparisonOp::Gt));
        assert!(compare(&five, &five, ComparisonOp::Gte));
        assert!(!compare(&five, &three, ComparisonOp::Lt));
    }

    #[test]
    fn float_on_either_side_switches_to_float_compare() {
        assert!(compare(&Value::from(2.5), &Value::from(3), ComparisonOp::Lt));
        assert!(compare(&Value::from(3), &Value::from(2.5), ComparisonOp::Gt));
        assert!(compare(&Value::from("2.75"), &Value::from(2.5f32), ComparisonOp::Gt));
        assert!(!compare(&Value::from(f64::NAN), &Value::from(1), ComparisonOp::Lte));
    }

    #[test]
    fn conversion_failure_is_false_not_error() {
        assert!(!compare(&Value::from("abc"), &Value::from(3), ComparisonOp::Lt));
        assert!(!compare(&Value::Invalid, &Value::from(3), ComparisonOp::Lt));
        assert!(!compare(&Value::from(vec![1]), &Value::from(3), ComparisonOp::Lt));
        assert!(compare(&Value::from(" 2 "), &Value::from(3u8), ComparisonOp::Lt));
    }

    #[test]
    fn size_compare_uses_code_points_for_strings() {
        let short = Value::from("héé");
        let long = Value::from("abcd");
        assert!(compare_size(&short, &long, ComparisonOp::Lt));
        assert!(!compare_size(&short, &Value::from(10), ComparisonOp::Lt));
        assert!(compare_size(&Value::from(4u8), &Value::from(4), ComparisonOp::Gte));
        assert!(compare_size(&Value::from(""), &Value::from("a"), ComparisonOp::Lt));
    }

    #[test]
    fn named_ops() {
        assert!(compare_named(&Value::from(1), &Value::from(2), "lt"));
        assert!(!compare_named(&Value::from(1), &Value::from(2), "ne"));
        assert_eq!("gte".parse::<ComparisonOp>(), Ok(ComparisonOp::Gte));
        assert!("eq".parse::<ComparisonOp>().is_err());
    }

    #[test]
    fn sign_aware_equality() {
        assert_eq!(equals(&Value::from(5i64), &Value::from(5u64)), Ok(true));
        assert_eq!(equals(&Value::from(5u8), &Value::from(5i32)), Ok(true));
        assert_eq!(equals(&Value::from(-1), &Value::from(1u64)), Ok(false));
        assert_eq!(equals(&Value::from(1u64), &Value::from(-1)), Ok(false));
        assert_eq!(
            equals(&Value::from(-1), &Value::from(u64::MAX)),
            Ok(false)
        );
    }

    #[test]
    fn kind_mismatch_is_unequal_without_error() {
        assert_eq!(equals(&Value::from(1), &Value::from("1")), Ok(false));
        assert_eq!(equals(&Value::from(1.0), &Value::from(1)), Ok(false));
    }

    #[test]
    fn float_widths_compare_as_f64() {
        assert_eq!(equals(&Value::from(0.5f32), &Value::from(0.5)), Ok(true));
        assert_eq!(equals(&Value::from(0.1f32), &Value::from(0.1)), Ok(false));
        assert_eq!(equals(&Value::from(f64::NAN), &Value::from(f64::NAN)), Ok(false));
    }

    #[test]
    fn same_kinds_compare_natively() {
        assert_eq!(equals(&Value::from("a"), &Value::from("a")), Ok(true));
        assert_eq!(equals(&Value::from(true), &Value::from(false)), Ok(false));
        assert_eq!(
            equals(
                &Value::Complex(Complex::new(1.0, 1.0)),
                &Value::Complex(Complex::new(1.0, 1.0))
            ),
            Ok(true)
        );
    }

    #[test]
    fn composites_are_bad_comparison_type() {
        assert_eq!(
            equals(&Value::from(vec![1]), &Value::from(1)),
            Err(KernelError::BadComparisonType)
        );
        assert_eq!(
            equals(&Value::from(1), &Value::Pointer(None)),
            Err(KernelError::BadComparisonType)
        );
        assert!(!is_equal(&Value::Invalid, &Value::Invalid));
    }

    #[test]
    fn integer_ordering_across_signs() {
        assert_eq!(
            Integer::Signed(-1).cmp_magnitude(Integer::Unsigned(0)),
            Ordering::Less
        );
        assert_eq!(
            Integer::Unsigned(u64::MAX).cmp_magnitude(Integer::Signed(i64::MAX)),
            Ordering::Greater
        );
    }
}
