//! # dynval registry
//!
//! Registration and invocation of user-supplied validator and filter
//! functions.
//!
//! A function is checked once when it is registered: its name must be an
//! identifier, it must take at least one parameter, and its return shape
//! must suit its role. A malformed registration is fatal. Once registered,
//! a [`FunctionHandle`] can be invoked with arbitrary arguments; absent
//! ones are replaced by the nil sentinel so the call never sees an
//! invalid slot.
//!
//! ```text
//! UserFn ──validate──▶ FunctionHandle ──insert──▶ Registry
//!                            │
//!   field, args ──build_args─┴─sanitize─▶ coerce params ─▶ call ─▶ Outcome
//! ```

pub mod args;
pub mod config;
pub mod error;
pub mod handle;
pub mod registry;
pub mod signature;

pub use args::{args_to_strings, strings_to_args};
pub use config::{RegistryOptions, RuntimeConfig};
pub use error::{CallError, ConfigError, InvokeError, RegistrationError};
pub use handle::{FunctionHandle, Outcome, ReturnContract, build_args, sanitize_args};
pub use registry::Registry;
pub use signature::{Arity, Body, Candidate, Role, UserFn};
