//! Coercion options.
//!
//! Loaded as the `[coercion]` table of the runtime configuration; every
//! field has a default so a partial table is accepted.

use serde::{Deserialize, Serialize};

/// Knobs for the numeric and string conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct CoercionOptions {
    /// Refuse strings and floats as sources for a 64-bit integer.
    pub strict_numeric: bool,

    /// Trim surrounding whitespace before parsing numeric text.
    pub trim_strings: bool,
}

impl Default for CoercionOptions {
    fn default() -> Self {
        Self {
            strict_numeric: false,
            trim_strings: true,
        }
    }
}

impl CoercionOptions {
    pub fn strict() -> Self {
        Self {
            strict_numeric: true,
            ..Self::default()
        }
    }
}
