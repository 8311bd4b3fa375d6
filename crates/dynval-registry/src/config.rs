//! Runtime configuration.
//!
//! ```toml
//! [coercion]
//! strict_numeric = false
//! trim_strings = true
//!
//! [registry]
//! allow_override = true
//! ```
//!
//! Missing tables and keys take their defaults.

use crate::error::ConfigError;
use dynval_kernel::CoercionOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Registry behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RegistryOptions {
    /// Registering an existing name replaces the previous function. When
    /// false, it is a fatal `DuplicateName` instead.
    pub allow_override: bool,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            allow_override: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub coercion: CoercionOptions,
    pub registry: RegistryOptions,
}

impl RuntimeConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        parse(text, "<inline>")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        parse(&text, &path.display().to_string())
    }
}

fn parse(text: &str, path: &str) -> Result<RuntimeConfig, ConfigError> {
    toml::from_str(text).map_err(|source| ConfigError::ParseToml {
        path: path.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(RuntimeConfig::from_toml_str("").unwrap(), RuntimeConfig::default());
    }

    #[test]
    fn tables_override_defaults() {
        let config = RuntimeConfig::from_toml_str(
            "[coercion]\nstrict_numeric = true\n\n[registry]\nallow_override = false\n",
        )
        .unwrap();
        assert!(config.coercion.strict_numeric);
        assert!(config.coercion.trim_strings);
        assert!(!config.registry.allow_override);
    }

    #[test]
    fn malformed_toml_is_reported() {
        let err = RuntimeConfig::from_toml_str("[coercion\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { .. }));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = RuntimeConfig::load("/nonexistent/dynval.toml").unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }
}
