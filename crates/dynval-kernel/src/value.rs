//! Runtime value representation.
//!
//! `Value` is the tagged union that replaces type erasure: host data is
//! converted once at the boundary, and everything downstream switches over
//! this closed set of variants.

use crate::kind::Shape;
use std::borrow::Cow;
use std::fmt;

static INVALID: Value = Value::Invalid;

/// Placeholder substituted for arguments that have no valid value, so a
/// registered function is never handed an unset slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NilSentinel;

/// A complex number with 64-bit float parts.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    pub fn is_zero(&self) -> bool {
        self.re == 0.0 && self.im == 0.0
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let im = format_float(self.im);
        let sign = if im.starts_with(['+', '-']) { "" } else { "+" };
        write!(f, "({}{sign}{im}i)", format_float(self.re))
    }
}

/// Shortest round-trip rendering of a float, in `%g` layout: exponent
/// form when the decimal exponent is below -4 or at least 6, plain
/// decimal otherwise. The exponent always carries a sign and two digits.
fn format_float<F>(value: F) -> String
where
    F: Copy + Into<f64> + fmt::Display + fmt::LowerExp,
{
    let wide: f64 = value.into();
    if wide.is_nan() {
        return "NaN".to_string();
    }
    if wide.is_infinite() {
        return if wide > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }

    let scientific = format!("{value:e}");
    let Some((mantissa, exp)) = scientific.split_once('e') else {
        return value.to_string();
    };
    let exp: i32 = exp.parse().unwrap_or_default();
    if wide == 0.0 || (-4..6).contains(&exp) {
        return value.to_string();
    }
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
}

/// Map contents as ordered key/value pairs.
///
/// Keys are dynamic values, so lookups go through the comparator rather
/// than hashing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapValue {
    pub entries: Vec<(Value, Value)>,
}

impl MapValue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(key, _)| key)
    }

}

impl<K: Into<Value>, V: Into<Value>> FromIterator<(K, V)> for MapValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

/// A struct-shaped value with its fields in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructValue {
    pub name: String,
    pub fields: Vec<(String, Value)>,
}

impl StructValue {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field (builder style).
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find_map(|(field, value)| (field == name).then_some(value))
    }
}

/// A dynamic value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// Unset or absent; the value a missing argument reflects to.
    #[default]
    Invalid,

    /// The nil sentinel.
    Nil,

    Bool(bool),

    /// Every signed integer width, widened.
    Int(i64),

    /// Every unsigned integer width, widened.
    Uint(u64),

    Float(f64),

    /// Single-precision float, kept narrow so it renders at its own width.
    Float32(f32),

    Complex(Complex),

    Str(String),

    /// Fixed-size array.
    Array(Vec<Value>),

    /// Growable sequence; `None` is a nil slice.
    Slice(Option<Vec<Value>>),

    /// `None` is a nil map.
    Map(Option<MapValue>),

    Struct(StructValue),

    /// Reference to another value; `None` is an absent reference.
    Pointer(Option<Box<Value>>),

    /// Snapshot of a channel's buffered elements; `None` is a nil channel.
    Chan(Option<Vec<Value>>),
}

impl Value {
    /// A non-nil slice.
    pub fn slice(items: Vec<Value>) -> Self {
        Self::Slice(Some(items))
    }

    /// A non-nil map built from key/value pairs.
    pub fn map<K: Into<Value>, V: Into<Value>>(pairs: Vec<(K, V)>) -> Self {
        Self::Map(Some(pairs.into_iter().collect()))
    }

    /// A present reference to `value`.
    pub fn pointer(value: impl Into<Value>) -> Self {
        Self::Pointer(Some(Box::new(value.into())))
    }

    pub fn shape(&self) -> Shape {
        match self {
            Self::Invalid => Shape::Invalid,
            Self::Nil => Shape::Struct,
            Self::Bool(_) => Shape::Bool,
            Self::Int(_) => Shape::Int,
            Self::Uint(_) => Shape::Uint,
            Self::Float(_) | Self::Float32(_) => Shape::Float,
            Self::Complex(_) => Shape::Complex,
            Self::Str(_) => Shape::String,
            Self::Array(_) => Shape::Array,
            Self::Slice(_) => Shape::Slice,
            Self::Map(_) => Shape::Map,
            Self::Struct(_) => Shape::Struct,
            Self::Pointer(_) => Shape::Pointer,
            Self::Chan(_) => Shape::Chan,
        }
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid)
    }

    pub fn is_nil_sentinel(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Either float width, widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Float32(f) => Some(f64::from(*f)),
            _ => None,
        }
    }

    /// Follow one level of reference. An absent reference yields `Invalid`;
    /// non-references are returned unchanged.
    pub fn indirect(&self) -> &Value {
        match self {
            Self::Pointer(Some(inner)) => inner,
            Self::Pointer(None) => &INVALID,
            other => other,
        }
    }

    /// Follow references until a non-reference (or an absent one) is reached.
    pub fn indirect_all(&self) -> &Value {
        let mut current = self;
        while let Self::Pointer(_) = current {
            current = current.indirect();
        }
        current
    }

    /// Structural zero test: true when the value equals the zero value of
    /// its own shape.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Invalid | Self::Nil => true,
            Self::Bool(b) => !b,
            Self::Int(i) => *i == 0,
            Self::Uint(u) => *u == 0,
            Self::Float(f) => *f == 0.0,
            Self::Float32(f) => *f == 0.0,
            Self::Complex(c) => c.is_zero(),
            Self::Str(s) => s.is_empty(),
            Self::Array(items) => items.iter().all(Value::is_zero),
            Self::Struct(st) => st.fields.iter().all(|(_, value)| value.is_zero()),
            Self::Slice(items) | Self::Chan(items) => items.is_none(),
            Self::Map(map) => map.is_none(),
            Self::Pointer(inner) => inner.is_none(),
        }
    }

    /// Native text form: a string is its own text; any other shape renders
    /// as a `<shape Value>` placeholder rather than its contents.
    pub fn text_form(&self) -> Cow<'_, str> {
        match self {
            Self::Str(s) => Cow::Borrowed(s),
            other => Cow::Owned(format!("<{} Value>", other.shape())),
        }
    }
}

macro_rules! from_signed {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::Int(value as i64)
            }
        })*
    };
}

macro_rules! from_unsigned {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::Uint(value as u64)
            }
        })*
    };
}

from_signed!(i8, i16, i32, i64, isize);
from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float32(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Complex> for Value {
    fn from(value: Complex) -> Self {
        Value::Complex(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<NilSentinel> for Value {
    fn from(_: NilSentinel) -> Self {
        Value::Nil
    }
}

impl From<MapValue> for Value {
    fn from(value: MapValue) -> Self {
        Value::Map(Some(value))
    }
}

impl From<StructValue> for Value {
    fn from(value: StructValue) -> Self {
        Value::Struct(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Slice(Some(items.into_iter().map(Into::into).collect()))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Invalid, Into::into)
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    write!(f, "[")?;
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            write!(f, " ")?;
        }
        write!(f, "{item}")?;
    }
    write!(f, "]")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid => write!(f, "<nil>"),
            Self::Nil => write!(f, "{{}}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Uint(v) => write!(f, "{v}"),
            Self::Float(v) => f.write_str(&format_float(*v)),
            Self::Float32(v) => f.write_str(&format_float(*v)),
            Self::Complex(v) => write!(f, "{v}"),
            Self::Str(v) => write!(f, "{v}"),
            Self::Array(items) => write_seq(f, items),
            Self::Slice(items) | Self::Chan(items) => {
                write_seq(f, items.as_deref().unwrap_or_default())
            }
            Self::Map(map) => {
                write!(f, "map[")?;
                let entries = map.as_ref().map(|m| m.entries.as_slice()).unwrap_or_default();
                for (idx, (key, value)) in entries.iter().enumerate() {
                    if idx > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{key}:{value}")?;
                }
                write!(f, "]")
            }
            Self::Struct(st) => {
                write!(f, "{{")?;
                for (idx, (_, value)) in st.fields.iter().enumerate() {
                    if idx > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, "}}")
            }
            Self::Pointer(Some(inner)) => write!(f, "&{inner}"),
            Self::Pointer(None) => write!(f, "<nil>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_none_reflects_to_invalid() {
        assert_eq!(Value::from(None::<i32>), Value::Invalid);
        assert_eq!(Value::from(Some(3i32)), Value::Int(3));
    }

    #[test]
    fn indirect_follows_one_level() {
        let ptr = Value::pointer(Value::pointer(7u8));
        assert_eq!(ptr.indirect(), &Value::pointer(7u8));
        assert_eq!(ptr.indirect_all(), &Value::Uint(7));
        assert_eq!(Value::Pointer(None).indirect(), &Value::Invalid);
        assert_eq!(Value::from(5).indirect(), &Value::Int(5));
    }

    #[test]
    fn zero_values_per_shape() {
        assert!(Value::Invalid.is_zero());
        assert!(Value::Nil.is_zero());
        assert!(Value::Slice(None).is_zero());
        assert!(!Value::slice(vec![]).is_zero());
        assert!(Value::from(StructValue::new("p").field("x", 0).field("y", "")).is_zero());
        assert!(!Value::from(StructValue::new("p").field("x", 1)).is_zero());
        assert!(Value::Array(vec![Value::from(0u8), Value::from(false)]).is_zero());
    }

    #[test]
    fn text_form_of_non_strings_is_a_placeholder() {
        assert_eq!(Value::from("abc").text_form(), "abc");
        assert_eq!(Value::from(42).text_form(), "<int Value>");
        assert_eq!(Value::Invalid.text_form(), "<invalid Value>");
    }

    #[test]
    fn display_renders_composites() {
        let value = Value::map(vec![("a", 1)]);
        assert_eq!(value.to_string(), "map[a:1]");
        assert_eq!(Value::from(vec![1, 2, 3]).to_string(), "[1 2 3]");
        assert_eq!(Value::Complex(Complex::new(1.0, -2.0)).to_string(), "(1-2i)");
    }

    #[test]
    fn floats_render_shortest_at_their_own_width() {
        assert_eq!(Value::from(0.1f32).to_string(), "0.1");
        assert_eq!(Value::from(3.25).to_string(), "3.25");
        assert_eq!(Value::from(100000.0).to_string(), "100000");
        assert_eq!(Value::from(1e6).to_string(), "1e+06");
        assert_eq!(Value::from(1e21).to_string(), "1e+21");
        assert_eq!(Value::from(1.5e-7).to_string(), "1.5e-07");
        assert_eq!(Value::from(0.0001).to_string(), "0.0001");
        assert_eq!(Value::from(-2.5e300).to_string(), "-2.5e+300");
        assert_eq!(Value::from(f64::INFINITY).to_string(), "+Inf");
        assert_eq!(Value::from(f32::NAN).to_string(), "NaN");
        assert_eq!(Value::from(0.1f32).as_f64(), Some(f64::from(0.1f32)));
    }

    #[test]
    fn struct_field_lookup() {
        let st = StructValue::new("user").field("age", 30u8);
        assert_eq!(st.get("age"), Some(&Value::Uint(30)));
        assert_eq!(st.get("name"), None);
    }
}
