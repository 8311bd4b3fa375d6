//! Name-keyed registry of validator and filter handles.
//!
//! Registration takes `&mut self` and happens during setup; afterwards the
//! registry is shared immutably (typically behind an `Arc`), so lookups
//! and invocations can never race a registration.

use crate::config::{RegistryOptions, RuntimeConfig};
use crate::error::{InvokeError, RegistrationError};
use crate::handle::{FunctionHandle, Outcome, build_args};
use crate::signature::{Candidate, Role};
use dynval_kernel::{CoercionOptions, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct Registry {
    options: RegistryOptions,
    coercion: CoercionOptions,
    validators: BTreeMap<String, FunctionHandle>,
    filters: BTreeMap<String, FunctionHandle>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self {
            options: config.registry,
            coercion: config.coercion,
            ..Self::default()
        }
    }

    /// Register a validator, returning the registration error instead of
    /// aborting.
    pub fn try_add_validator(
        &mut self,
        name: impl Into<String>,
        candidate: impl Into<Candidate>,
    ) -> Result<(), RegistrationError> {
        let handle = FunctionHandle::validator(name, candidate)?;
        self.insert(handle)
    }

    /// Register a filter, returning the registration error instead of
    /// aborting.
    pub fn try_add_filter(
        &mut self,
        name: impl Into<String>,
        candidate: impl Into<Candidate>,
    ) -> Result<(), RegistrationError> {
        let handle = FunctionHandle::filter(name, candidate)?;
        self.insert(handle)
    }

    /// Register a validator.
    ///
    /// # Panics
    ///
    /// On any [`RegistrationError`]. A malformed registration is a
    /// programming mistake and must not be recovered from.
    pub fn add_validator(&mut self, name: impl Into<String>, candidate: impl Into<Candidate>) {
        if let Err(err) = self.try_add_validator(name, candidate) {
            fatal(err);
        }
    }

    /// Register a filter.
    ///
    /// # Panics
    ///
    /// On any [`RegistrationError`].
    pub fn add_filter(&mut self, name: impl Into<String>, candidate: impl Into<Candidate>) {
        if let Err(err) = self.try_add_filter(name, candidate) {
            fatal(err);
        }
    }

    fn insert(&mut self, handle: FunctionHandle) -> Result<(), RegistrationError> {
        let role = handle.role();
        let table = match role {
            Role::Validator => &mut self.validators,
            Role::Filter => &mut self.filters,
        };
        if !self.options.allow_override && table.contains_key(handle.name()) {
            return Err(RegistrationError::DuplicateName {
                role,
                name: handle.name().to_string(),
            });
        }
        tracing::debug!(
            name = handle.name(),
            %role,
            params = handle.arity().params,
            "registered function"
        );
        table.insert(handle.name().to_string(), handle);
        Ok(())
    }

    pub fn validator(&self, name: &str) -> Option<&FunctionHandle> {
        self.validators.get(name)
    }

    pub fn filter(&self, name: &str) -> Option<&FunctionHandle> {
        self.filters.get(name)
    }

    pub fn has_validator(&self, name: &str) -> bool {
        self.validators.contains_key(name)
    }

    pub fn has_filter(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    /// Validator names in sorted order.
    pub fn validator_names(&self) -> impl Iterator<Item = &str> {
        self.validators.keys().map(String::as_str)
    }

    /// Filter names in sorted order.
    pub fn filter_names(&self) -> impl Iterator<Item = &str> {
        self.filters.keys().map(String::as_str)
    }

    /// Run the named validator against `field` with the rule `args`.
    pub fn validate<I, A>(&self, name: &str, field: impl Into<Value>, args: I) -> Result<bool, InvokeError>
    where
        I: IntoIterator<Item = A>,
        A: Into<Value>,
    {
        let handle = self.validator(name).ok_or_else(|| InvokeError::UnknownFunction {
            role: Role::Validator,
            name: name.to_string(),
        })?;
        let outcome = handle.invoke_with(build_args(field, args), &self.coercion)?;
        Ok(outcome.passed().unwrap_or(false))
    }

    /// Run the named filter against `field` with the rule `args`.
    pub fn apply_filter<I, A>(
        &self,
        name: &str,
        field: impl Into<Value>,
        args: I,
    ) -> Result<Outcome, InvokeError>
    where
        I: IntoIterator<Item = A>,
        A: Into<Value>,
    {
        let handle = self.filter(name).ok_or_else(|| InvokeError::UnknownFunction {
            role: Role::Filter,
            name: name.to_string(),
        })?;
        handle.invoke_with(build_args(field, args), &self.coercion)
    }
}

fn fatal(err: RegistrationError) -> ! {
    tracing::error!(name = err.name(), error = %err, "fatal registration error");
    panic!("validate: {err}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::UserFn;
    use dynval_kernel::is_empty;

    fn required() -> UserFn {
        UserFn::predicate(1, |args| !is_empty(&args[0]))
    }

    #[test]
    fn lookup_after_registration() {
        let mut registry = Registry::new();
        registry.add_validator("required", required());
        registry.add_filter("upper", UserFn::mapping(1, |args| {
            Value::from(args[0].text_form().to_uppercase())
        }));

        assert!(registry.has_validator("required"));
        assert!(!registry.has_filter("required"));
        assert_eq!(registry.validator_names().collect::<Vec<_>>(), vec!["required"]);
        assert_eq!(registry.filter_names().collect::<Vec<_>>(), vec!["upper"]);

        assert_eq!(registry.validate("required", "x", Vec::<Value>::new()), Ok(true));
        assert_eq!(registry.validate("required", "", Vec::<Value>::new()), Ok(false));
        assert_eq!(
            registry.apply_filter("upper", "abc", Vec::<Value>::new()),
            Ok(Outcome::Value(Value::from("ABC")))
        );
    }

    #[test]
    fn unknown_names_are_reported() {
        let registry = Registry::new();
        assert!(matches!(
            registry.validate("missing", 1, Vec::<Value>::new()),
            Err(InvokeError::UnknownFunction { role: Role::Validator, .. })
        ));
    }

    #[test]
    fn override_replaces_by_default() {
        let mut registry = Registry::new();
        registry.add_validator("flag", UserFn::predicate(1, |_| false));
        registry.add_validator("flag", UserFn::predicate(1, |_| true));
        assert_eq!(registry.validate("flag", 0, Vec::<Value>::new()), Ok(true));
    }

    #[test]
    fn duplicates_rejected_when_override_disabled() {
        let config = RuntimeConfig {
            registry: RegistryOptions {
                allow_override: false,
            },
            ..RuntimeConfig::default()
        };
        let mut registry = Registry::from_config(&config);
        registry.add_validator("flag", required());
        let err = registry.try_add_validator("flag", required()).unwrap_err();
        assert!(matches!(err, RegistrationError::DuplicateName { .. }));
    }

    #[test]
    #[should_panic(expected = "validate: validator name \"123abc\" is not a valid identifier")]
    fn bad_name_is_fatal() {
        Registry::new().add_validator("123abc", required());
    }
}
