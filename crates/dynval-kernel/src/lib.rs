//! # dynval kernel
//!
//! A dynamic-value runtime: it lets a statically typed host reason about
//! field values whose concrete type is only known at validation time.
//!
//! ## Architecture
//!
//! ```text
//! Value            ← tagged union built once where data enters
//!     │
//! kind             ← Shape + BaseKind classification
//!     │
//! convert          ← best-effort int64 / float / bool / text conversions
//!     │
//! coerce           ← closed (source kind, target kind) table
//! compare          ← ordering + sign-aware equality
//! measure          ← emptiness and length
//! membership       ← string / sequence / map containment
//! ident            ← identifier names for registration
//! ```
//!
//! Every operation here is synchronous, allocation-light and holds no
//! shared state; failures are returned as [`KernelError`] values.

pub mod coerce;
pub mod compare;
pub mod config;
pub mod convert;
pub mod error;
pub mod ident;
pub mod kind;
pub mod measure;
pub mod membership;
pub mod value;

pub use coerce::{BasicValue, TargetKind, coerce, coerce_with, to_basic_type};
pub use compare::{ComparisonOp, Integer, compare, compare_named, compare_size, equals, is_equal};
pub use config::CoercionOptions;
pub use convert::{parse_bool, to_float, to_int64, to_text};
pub use error::{KernelError, KernelResult};
pub use ident::is_valid_identifier;
pub use kind::{BaseKind, Shape, classify};
pub use measure::{is_empty, length};
pub use membership::{Membership, contains};
pub use value::{Complex, MapValue, NilSentinel, StructValue, Value};
