//! Membership checks over strings, sequences and maps.
//!
//! The container's shape is inspected before anything is walked, so an
//! unsuitable container is reported as unsupported instead of faulting.
//! A container with a length but no positional access (a channel) is only
//! supported while it is empty.

use crate::compare::is_equal;
use crate::value::Value;

/// Result of a membership check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Membership {
    /// The container shape supports membership.
    pub supported: bool,
    /// The element was found.
    pub found: bool,
}

impl Membership {
    pub const UNSUPPORTED: Self = Self {
        supported: false,
        found: false,
    };

    pub const fn checked(found: bool) -> Self {
        Self {
            supported: true,
            found,
        }
    }
}

impl From<Membership> for (bool, bool) {
    fn from(m: Membership) -> Self {
        (m.supported, m.found)
    }
}

/// Whether `container` contains `element`.
///
/// - string: substring search for the element's native text form
/// - map: some key equals the element (values are not consulted)
/// - array/slice: some item equals the element
///
/// Equality follows [`crate::compare::equals`]. Shapes without a length
/// are unsupported.
pub fn contains(container: &Value, element: &Value) -> Membership {
    let shape = container.shape();
    if !shape.has_len() {
        tracing::debug!(%shape, "membership check on unsupported container");
        return Membership::UNSUPPORTED;
    }

    let items: &[Value] = match container {
        Value::Str(text) => {
            let needle = element.text_form();
            return Membership::checked(text.contains(&*needle));
        }
        Value::Map(map) => {
            return Membership::checked(
                map.as_ref()
                    .is_some_and(|m| m.keys().any(|key| is_equal(key, element))),
            );
        }
        Value::Array(items) => items.as_slice(),
        Value::Slice(items) | Value::Chan(items) => items.as_deref().unwrap_or_default(),
        _ => &[],
    };

    if items.is_empty() {
        return Membership::checked(false);
    }
    if !shape.is_indexable() {
        tracing::debug!(%shape, "membership check on non-indexable container");
        return Membership::UNSUPPORTED;
    }
    Membership::checked(items.iter().any(|item| is_equal(item, element)))
}
