//! Error types for registration, invocation and configuration.
//!
//! Registration errors are setup-time faults: the fatal registry surface
//! aborts on them. Invocation and configuration errors are ordinary values.

use crate::signature::Role;
use dynval_kernel::KernelError;

/// A malformed registration. Always a programming mistake.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("{role} name {name:?} is not a valid identifier")]
    InvalidName { role: Role, name: String },

    #[error("{role} '{name}': the registered value is absent or not a function")]
    NotCallable { role: Role, name: String },

    #[error("{role} '{name}' must declare at least one parameter")]
    NoParameters { role: Role, name: String },

    #[error("{role} '{name}' has an unsupported return shape: {detail}")]
    BadReturnType {
        role: Role,
        name: String,
        detail: String,
    },

    #[error("{role} '{name}' is already registered")]
    DuplicateName { role: Role, name: String },
}

impl RegistrationError {
    pub fn name(&self) -> &str {
        match self {
            Self::InvalidName { name, .. }
            | Self::NotCallable { name, .. }
            | Self::NoParameters { name, .. }
            | Self::BadReturnType { name, .. }
            | Self::DuplicateName { name, .. } => name,
        }
    }
}

/// Error value returned by a fallible filter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CallError {
    pub message: String,
}

impl CallError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A call that could not be dispatched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvokeError {
    #[error("no {role} named '{name}' is registered")]
    UnknownFunction { role: Role, name: String },

    #[error("function '{name}' expected {expected} arguments but received {received}")]
    ArityMismatch {
        name: String,
        expected: String,
        received: usize,
    },

    #[error("function '{name}' argument #{index}: {source}")]
    ArgConvert {
        name: String,
        index: usize,
        #[source]
        source: KernelError,
    },
}

/// Configuration could not be read or parsed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid toml at {path}: {source}")]
    ParseToml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}
