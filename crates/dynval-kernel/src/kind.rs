//! Kind classification.
//!
//! Every [`Value`] has a [`Shape`] (what it structurally is) and, when the
//! shape is a primitive, a [`BaseKind`] (how it compares and coerces).
//! Classification never guesses: composite shapes are reported as
//! `UnsupportedKind` rather than folded into a neighbouring kind.

use crate::error::{KernelError, KernelResult};
use crate::value::Value;
use std::fmt;

/// The closed set of kinds every comparison and coercion switches over.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BaseKind {
    Invalid,
    Bool,
    Complex,
    Int,
    Float,
    String,
    Uint,
}

impl BaseKind {
    /// Base kind of `value`, or `Invalid` for shapes without one.
    pub fn of(value: &Value) -> Self {
        classify(value).unwrap_or(Self::Invalid)
    }

    /// Whether the kind is one of the integer kinds (`Int` or `Uint`).
    pub fn is_integer(self) -> bool {
        matches!(self, Self::Int | Self::Uint)
    }
}

impl fmt::Display for BaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Invalid => "invalid",
            Self::Bool => "bool",
            Self::Complex => "complex",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Uint => "uint",
        };
        f.write_str(name)
    }
}

/// Structural shape of a value, including the composite shapes that have
/// no base kind.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Invalid,
    Bool,
    Int,
    Uint,
    Float,
    Complex,
    String,
    Array,
    Slice,
    Map,
    Struct,
    Pointer,
    Chan,
}

impl Shape {
    /// Whether values of this shape have an element count.
    pub fn has_len(self) -> bool {
        matches!(
            self,
            Self::String | Self::Array | Self::Slice | Self::Map | Self::Chan
        )
    }

    /// Whether values of this shape can be walked element by element.
    pub fn is_indexable(self) -> bool {
        matches!(self, Self::Array | Self::Slice)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Invalid => "invalid",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Float => "float",
            Self::Complex => "complex",
            Self::String => "string",
            Self::Array => "array",
            Self::Slice => "slice",
            Self::Map => "map",
            Self::Struct => "struct",
            Self::Pointer => "ptr",
            Self::Chan => "chan",
        };
        f.write_str(name)
    }
}

/// Map a value to its base kind.
///
/// Primitive shapes map one-to-one. Anything else (including an unset
/// value and the nil sentinel) fails with `UnsupportedKind`, carrying the
/// shape that was rejected.
pub fn classify(value: &Value) -> KernelResult<BaseKind> {
    let shape = value.shape();
    match shape {
        Shape::Bool => Ok(BaseKind::Bool),
        Shape::Int => Ok(BaseKind::Int),
        Shape::Uint => Ok(BaseKind::Uint),
        Shape::Float => Ok(BaseKind::Float),
        Shape::Complex => Ok(BaseKind::Complex),
        Shape::String => Ok(BaseKind::String),
        _ => Err(KernelError::UnsupportedKind { shape }),
    }
}
