//! Error types for kernel operations.
//!
//! Every variant here is a data-time fault: it is returned to the caller as
//! an explicit value and never aborts the process.

use crate::kind::Shape;

/// Recoverable failures produced while classifying, comparing or coercing
/// dynamic values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KernelError {
    /// The value's shape has no base kind (slice, map, struct, ...).
    #[error("unsupported kind: {shape}")]
    UnsupportedKind { shape: Shape },

    /// At least one operand of an equality check is not a basic kind.
    #[error("invalid type for operation")]
    BadComparisonType,

    /// The requested conversion is outside the coercion table, or the
    /// source text/number did not fit the target.
    #[error("convert value is failure: {from} -> {to}")]
    ConvertFail { from: String, to: String },
}

impl KernelError {
    pub(crate) fn convert_fail(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::ConvertFail {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Whether this is a `ConvertFail`, regardless of its detail.
    pub fn is_convert_fail(&self) -> bool {
        matches!(self, Self::ConvertFail { .. })
    }
}

pub type KernelResult<T> = Result<T, KernelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_fail_message_names_both_sides() {
        let err = KernelError::convert_fail("string", "int");
        insta::assert_snapshot!(err.to_string(), @"convert value is failure: string -> int");
        assert!(err.is_convert_fail());
        assert!(!KernelError::BadComparisonType.is_convert_fail());
    }

    #[test]
    fn unsupported_kind_names_shape() {
        let err = KernelError::UnsupportedKind { shape: Shape::Map };
        insta::assert_snapshot!(err.to_string(), @"unsupported kind: map");
    }
}
