//! Property tests for the numeric comparator and sign-aware equality.

use dynval_kernel::{ComparisonOp, Value, compare, equals};
use proptest::prelude::*;

fn op() -> impl Strategy<Value = ComparisonOp> {
    prop_oneof![
        Just(ComparisonOp::Lt),
        Just(ComparisonOp::Lte),
        Just(ComparisonOp::Gt),
        Just(ComparisonOp::Gte),
    ]
}

proptest! {
    #[test]
    fn prop_signed_unsigned_equality_is_symmetric(i in any::<i64>(), u in any::<u64>()) {
        let (a, b) = (Value::from(i), Value::from(u));
        prop_assert_eq!(equals(&a, &b), equals(&b, &a));
    }

    #[test]
    fn prop_negative_never_equals_unsigned(i in i64::MIN..0i64, u in any::<u64>()) {
        prop_assert_eq!(equals(&Value::from(i), &Value::from(u)), Ok(false));
        prop_assert_eq!(equals(&Value::from(u), &Value::from(i)), Ok(false));
    }

    #[test]
    fn prop_non_negative_matches_its_magnitude(i in 0i64..=i64::MAX) {
        prop_assert_eq!(equals(&Value::from(i), &Value::from(i as u64)), Ok(true));
    }

    #[test]
    fn prop_integer_compare_matches_native(a in any::<i64>(), b in any::<i64>(), op in op()) {
        let expected = match op {
            ComparisonOp::Lt => a < b,
            ComparisonOp::Lte => a <= b,
            ComparisonOp::Gt => a > b,
            ComparisonOp::Gte => a >= b,
        };
        prop_assert_eq!(compare(&Value::from(a), &Value::from(b), op), expected);
    }

    #[test]
    fn prop_strict_orderings_are_converse(a in -1.0e9f64..1.0e9, b in -1.0e9f64..1.0e9) {
        let (x, y) = (Value::from(a), Value::from(b));
        prop_assert_eq!(
            compare(&x, &y, ComparisonOp::Lt),
            compare(&y, &x, ComparisonOp::Gt)
        );
    }
}
