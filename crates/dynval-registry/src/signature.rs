//! User function descriptors.
//!
//! A registered function has a fixed call contract: it receives the
//! sanitized argument list as `&[Value]` and produces one of a few return
//! shapes. The shape and the declared parameter count are recorded here so
//! registration can check them once, up front.

use crate::error::CallError;
use dynval_kernel::{TargetKind, Value};
use std::fmt;
use std::sync::Arc;

type Predicate = Arc<dyn Fn(&[Value]) -> bool + Send + Sync>;
type Mapping = Arc<dyn Fn(&[Value]) -> Value + Send + Sync>;
type Fallible = Arc<dyn Fn(&[Value]) -> Result<Value, CallError> + Send + Sync>;
type Multi = Arc<dyn Fn(&[Value]) -> Vec<Value> + Send + Sync>;

/// What a registered function is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Validator,
    Filter,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validator => write!(f, "validator"),
            Self::Filter => write!(f, "filter"),
        }
    }
}

/// Declared parameter list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    /// Declared parameter count, the variadic tail included.
    pub params: usize,
    /// The last parameter collects any number of trailing arguments.
    pub variadic: bool,
}

impl Arity {
    /// Minimum number of arguments a call must supply.
    pub fn min_args(self) -> usize {
        if self.variadic {
            self.params.saturating_sub(1)
        } else {
            self.params
        }
    }

    pub fn accepts(self, args: usize) -> bool {
        if self.variadic {
            args >= self.min_args()
        } else {
            args == self.params
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.variadic {
            write!(f, "at least {}", self.min_args())
        } else {
            write!(f, "{}", self.params)
        }
    }
}

/// Return shape of a function body.
#[derive(Clone)]
pub enum Body {
    /// Exactly one boolean result.
    Predicate(Predicate),
    /// Exactly one result of any kind.
    Mapping(Mapping),
    /// A result paired with an error.
    Fallible(Fallible),
    /// Any fixed number of untyped results.
    Multi { results: usize, call: Multi },
}

impl Body {
    pub fn results(&self) -> usize {
        match self {
            Self::Predicate(_) | Self::Mapping(_) => 1,
            Self::Fallible(_) => 2,
            Self::Multi { results, .. } => *results,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Predicate(_) => "bool".to_string(),
            Self::Mapping(_) => "value".to_string(),
            Self::Fallible(_) => "(value, error)".to_string(),
            Self::Multi { results, .. } => format!("{results} untyped results"),
        }
    }
}

/// A user-supplied function together with its declared signature.
#[derive(Clone)]
pub struct UserFn {
    arity: Arity,
    param_kinds: Vec<Option<TargetKind>>,
    body: Body,
}

impl UserFn {
    fn new(params: usize, body: Body) -> Self {
        Self {
            arity: Arity {
                params,
                variadic: false,
            },
            param_kinds: Vec::new(),
            body,
        }
    }

    /// A function returning exactly one boolean.
    pub fn predicate<F>(params: usize, f: F) -> Self
    where
        F: Fn(&[Value]) -> bool + Send + Sync + 'static,
    {
        Self::new(params, Body::Predicate(Arc::new(f)))
    }

    /// A function returning exactly one value.
    pub fn mapping<F>(params: usize, f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self::new(params, Body::Mapping(Arc::new(f)))
    }

    /// A function returning a value or an error.
    pub fn fallible<F>(params: usize, f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, CallError> + Send + Sync + 'static,
    {
        Self::new(params, Body::Fallible(Arc::new(f)))
    }

    /// A function returning `results` untyped values.
    pub fn multi<F>(params: usize, results: usize, f: F) -> Self
    where
        F: Fn(&[Value]) -> Vec<Value> + Send + Sync + 'static,
    {
        Self::new(
            params,
            Body::Multi {
                results,
                call: Arc::new(f),
            },
        )
    }

    /// Mark the last declared parameter as variadic.
    pub fn variadic(mut self) -> Self {
        self.arity.variadic = true;
        self
    }

    /// Declare the kind each leading parameter expects. Arguments in those
    /// positions are run through the coercion table before the call; `None`
    /// leaves a position untouched. For a variadic function the last entry
    /// also applies to every trailing argument.
    pub fn param_kinds<I>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = Option<TargetKind>>,
    {
        self.param_kinds = kinds.into_iter().collect();
        self
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Declared target kind for argument position `index`.
    pub fn param_kind(&self, index: usize) -> Option<TargetKind> {
        let tail = self.arity.variadic && index + 1 >= self.arity.params;
        let slot = if tail {
            self.arity.params.checked_sub(1)?
        } else {
            index
        };
        self.param_kinds.get(slot).copied().flatten()
    }
}

impl fmt::Debug for UserFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserFn")
            .field("arity", &self.arity)
            .field("param_kinds", &self.param_kinds)
            .field("returns", &self.body.describe())
            .finish()
    }
}

/// Whatever was handed to registration.
#[derive(Debug, Clone)]
pub enum Candidate {
    /// Nothing was supplied.
    Absent,
    /// A plain value, which is not callable.
    Value(Value),
    Func(UserFn),
}

impl From<UserFn> for Candidate {
    fn from(func: UserFn) -> Self {
        Self::Func(func)
    }
}

impl From<Value> for Candidate {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Option<UserFn>> for Candidate {
    fn from(func: Option<UserFn>) -> Self {
        func.map_or(Self::Absent, Self::Func)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_acceptance() {
        let fixed = Arity {
            params: 2,
            variadic: false,
        };
        assert!(fixed.accepts(2));
        assert!(!fixed.accepts(1));
        assert!(!fixed.accepts(3));
        assert_eq!(fixed.to_string(), "2");

        let variadic = Arity {
            params: 2,
            variadic: true,
        };
        assert!(variadic.accepts(1));
        assert!(variadic.accepts(5));
        assert!(!variadic.accepts(0));
        assert_eq!(variadic.to_string(), "at least 1");
    }

    #[test]
    fn variadic_tail_reuses_last_kind() {
        let func = UserFn::predicate(2, |_| true)
            .variadic()
            .param_kinds([None, Some(TargetKind::Int64)]);
        assert_eq!(func.param_kind(0), None);
        assert_eq!(func.param_kind(1), Some(TargetKind::Int64));
        assert_eq!(func.param_kind(4), Some(TargetKind::Int64));

        let fixed = UserFn::predicate(1, |_| true).param_kinds([Some(TargetKind::Bool)]);
        assert_eq!(fixed.param_kind(0), Some(TargetKind::Bool));
        assert_eq!(fixed.param_kind(1), None);
    }

    #[test]
    fn result_counts() {
        assert_eq!(UserFn::predicate(1, |_| true).body().results(), 1);
        assert_eq!(UserFn::fallible(1, |a| Ok(a[0].clone())).body().results(), 2);
        assert_eq!(UserFn::multi(1, 3, |_| vec![]).body().results(), 3);
    }

    #[test]
    fn candidates_from_host_values() {
        assert!(matches!(Candidate::from(None::<UserFn>), Candidate::Absent));
        assert!(matches!(Candidate::from(Value::from(1)), Candidate::Value(_)));
    }
}
