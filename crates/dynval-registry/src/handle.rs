//! Validated function handles and panic-free invocation.

use crate::error::{CallError, InvokeError, RegistrationError};
use crate::signature::{Arity, Body, Candidate, Role, UserFn};
use dynval_kernel::{BaseKind, CoercionOptions, TargetKind, Value, coerce_with, is_valid_identifier};

/// How a handle reports its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnContract {
    /// A single boolean (every validator).
    Bool,
    /// A single value of any kind.
    Value,
    /// A value paired with an error.
    ValueOrError,
}

/// What a call produced, in the shape the function declared.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Bool(bool),
    Value(Value),
    Fallible(Result<Value, CallError>),
    Multi(Vec<Value>),
}

impl Outcome {
    /// The verdict of a predicate; `None` for any other shape.
    pub fn passed(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The primary result. A boolean becomes a bool value, and an empty
    /// multi-result becomes `Invalid`.
    pub fn into_value(self) -> Result<Value, CallError> {
        match self {
            Self::Bool(b) => Ok(Value::Bool(b)),
            Self::Value(value) => Ok(value),
            Self::Fallible(result) => result,
            Self::Multi(values) => Ok(values.into_iter().next().unwrap_or_default()),
        }
    }
}

/// A registered, validated function. Immutable once built and cheap to
/// clone; safe to invoke from many threads at once.
#[derive(Debug, Clone)]
pub struct FunctionHandle {
    name: String,
    role: Role,
    func: UserFn,
}

impl FunctionHandle {
    /// Validate `candidate` as a validator: it must return exactly one bool.
    pub fn validator(
        name: impl Into<String>,
        candidate: impl Into<Candidate>,
    ) -> Result<Self, RegistrationError> {
        Self::check(Role::Validator, name.into(), candidate.into())
    }

    /// Validate `candidate` as a filter: it must return one value of any
    /// kind, or a value paired with an error.
    pub fn filter(
        name: impl Into<String>,
        candidate: impl Into<Candidate>,
    ) -> Result<Self, RegistrationError> {
        Self::check(Role::Filter, name.into(), candidate.into())
    }

    fn check(role: Role, name: String, candidate: Candidate) -> Result<Self, RegistrationError> {
        if !is_valid_identifier(&name) {
            return Err(RegistrationError::InvalidName { role, name });
        }

        let func = match candidate {
            Candidate::Func(func) => func,
            Candidate::Absent | Candidate::Value(_) => {
                return Err(RegistrationError::NotCallable { role, name });
            }
        };

        if func.arity().params == 0 {
            return Err(RegistrationError::NoParameters { role, name });
        }

        let good_return = match (role, func.body()) {
            (Role::Validator, Body::Predicate(_)) => true,
            (Role::Validator, _) => false,
            (Role::Filter, Body::Multi { results, .. }) => *results == 1,
            (Role::Filter, _) => true,
        };
        if !good_return {
            let detail = match role {
                Role::Validator => format!("must return a bool, found {}", func.body().describe()),
                Role::Filter => format!(
                    "must return one value or (value, error), found {}",
                    func.body().describe()
                ),
            };
            return Err(RegistrationError::BadReturnType { role, name, detail });
        }

        Ok(Self { name, role, func })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn arity(&self) -> Arity {
        self.func.arity()
    }

    pub fn returns(&self) -> ReturnContract {
        match self.func.body() {
            Body::Predicate(_) => ReturnContract::Bool,
            Body::Fallible(_) => ReturnContract::ValueOrError,
            Body::Mapping(_) | Body::Multi { .. } => ReturnContract::Value,
        }
    }

    /// Call with default coercion options.
    pub fn invoke<I, A>(&self, args: I) -> Result<Outcome, InvokeError>
    where
        I: IntoIterator<Item = A>,
        A: Into<Value>,
    {
        self.invoke_with(args, &CoercionOptions::default())
    }

    /// Call the function.
    ///
    /// Unset arguments are replaced by the nil sentinel, so the body never
    /// sees an invalid slot. Arguments in positions with a declared kind
    /// are coerced first. A wrong argument count is reported instead of
    /// being passed through.
    pub fn invoke_with<I, A>(&self, args: I, opts: &CoercionOptions) -> Result<Outcome, InvokeError>
    where
        I: IntoIterator<Item = A>,
        A: Into<Value>,
    {
        let args = sanitize_args(args);
        let arity = self.func.arity();
        if !arity.accepts(args.len()) {
            return Err(InvokeError::ArityMismatch {
                name: self.name.clone(),
                expected: arity.to_string(),
                received: args.len(),
            });
        }

        let args = self.coerce_args(args, opts)?;
        let outcome = match self.func.body() {
            Body::Predicate(call) => Outcome::Bool(call(&args)),
            Body::Mapping(call) => Outcome::Value(call(&args)),
            Body::Fallible(call) => Outcome::Fallible(call(&args)),
            Body::Multi { call, .. } => Outcome::Multi(call(&args)),
        };
        Ok(outcome)
    }

    /// Call with `field` as the first argument followed by `args`.
    pub fn call_with<I, A>(&self, field: impl Into<Value>, args: I) -> Result<Outcome, InvokeError>
    where
        I: IntoIterator<Item = A>,
        A: Into<Value>,
    {
        self.invoke(build_args(field, args))
    }

    fn coerce_args(
        &self,
        mut args: Vec<Value>,
        opts: &CoercionOptions,
    ) -> Result<Vec<Value>, InvokeError> {
        for (index, arg) in args.iter_mut().enumerate() {
            let Some(target) = self.func.param_kind(index) else {
                continue;
            };
            if arg.is_nil_sentinel() || already_fits(arg, target) {
                continue;
            }
            *arg = coerce_with(arg, BaseKind::of(arg), target, opts).map_err(|source| {
                InvokeError::ArgConvert {
                    name: self.name.clone(),
                    index,
                    source,
                }
            })?;
        }
        Ok(args)
    }
}

fn already_fits(value: &Value, target: TargetKind) -> bool {
    matches!(
        (value, target),
        (Value::Int(_), TargetKind::Int | TargetKind::Int64)
            | (Value::Bool(_), TargetKind::Bool)
            | (Value::Str(_), TargetKind::String)
    )
}

/// Convert arguments to values, substituting the nil sentinel for any that
/// reflect to an unset value.
pub fn sanitize_args<I, A>(args: I) -> Vec<Value>
where
    I: IntoIterator<Item = A>,
    A: Into<Value>,
{
    args.into_iter()
        .enumerate()
        .map(|(index, arg)| match arg.into() {
            Value::Invalid => {
                tracing::trace!(index, "substituting nil sentinel for absent argument");
                Value::Nil
            }
            value => value,
        })
        .collect()
}

/// Prepend the field value to the rule arguments.
pub fn build_args<I, A>(field: impl Into<Value>, args: I) -> Vec<Value>
where
    I: IntoIterator<Item = A>,
    A: Into<Value>,
{
    std::iter::once(field.into())
        .chain(args.into_iter().map(Into::into))
        .collect()
}
