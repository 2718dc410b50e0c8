//! Engine configuration.
//!
//! Loaded from TOML; every key is optional and unknown keys are rejected.
//!
//! ```toml
//! required_message = "is required"
//! whitespace_is_blank = true
//! rule_policy = "halt_field_on_error"
//! skip_unchanged = false
//! empty_string_as_null = false
//! ```

use crate::core::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Message used by the presence gate when none is configured.
pub const DEFAULT_REQUIRED_MESSAGE: &str = "can't be blank";

/// How rules declared on the same field interact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RulePolicy {
    /// Every selected rule runs; errors accumulate.
    #[default]
    RunAll,
    /// Once a field has an error, its remaining rules are skipped.
    HaltFieldOnError,
}

/// Settings shared by every pipeline stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Message attached to a field that is required but blank.
    pub required_message: String,
    /// Whether whitespace-only strings count as blank.
    pub whitespace_is_blank: bool,
    /// Policy for multiple rules on one field.
    pub rule_policy: RulePolicy,
    /// Skip recording a permitted change equal to the base value.
    pub skip_unchanged: bool,
    /// Store empty-string payload values as null.
    pub empty_string_as_null: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            required_message: DEFAULT_REQUIRED_MESSAGE.to_string(),
            whitespace_is_blank: true,
            rule_policy: RulePolicy::RunAll,
            skip_unchanged: false,
            empty_string_as_null: false,
        }
    }
}

impl EngineConfig {
    /// Parse configuration from a TOML string.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Load configuration from a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        log::debug!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Set the rule policy.
    pub fn with_rule_policy(mut self, policy: RulePolicy) -> Self {
        self.rule_policy = policy;
        self
    }

    /// Set the required-field message.
    pub fn with_required_message(mut self, message: impl Into<String>) -> Self {
        self.required_message = message.into();
        self
    }
}
