//! Error types for Fieldgate.
//!
//! Two tiers of failure exist:
//! - Field errors ([`ErrorMessage`]) are expected outcomes of validating user
//!   input. They live inside a draft and never interrupt a pipeline.
//! - Wiring faults ([`RegistryError`], [`ConfigError`]) mean the application
//!   declared something that cannot work. They surface as `Err` from build,
//!   define and load functions.

use crate::core::types::{FieldName, Value};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Identifier of a single draft, used to correlate log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DraftId(pub Uuid);

impl DraftId {
    /// Create a new random draft ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DraftId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DraftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Top-level error type for Fieldgate.
#[derive(Error, Debug)]
pub enum FieldgateError {
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid draft: {0}")]
    InvalidDraft(#[from] InvalidDraft),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Faults in how a record type declares its validators.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryError {
    #[error("Unknown validator '{validator}' declared on field '{field}' of {record_type}")]
    UnknownValidator {
        record_type: String,
        field: String,
        validator: String,
    },

    #[error("Nested rule list declared on field '{field}' of {record_type}")]
    NestedRuleList { record_type: String, field: String },

    #[error("Empty field name declared on {record_type}")]
    EmptyFieldName { record_type: String },
}

/// Faults in loading engine configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config from {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Returned when a draft with field errors is applied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} field(s) failed validation: {}", .fields.len(), join_fields(.fields))]
pub struct InvalidDraft {
    /// Fields carrying at least one error, in the order they first failed.
    pub fields: Vec<FieldName>,
}

fn join_fields(fields: &[FieldName]) -> String {
    fields
        .iter()
        .map(FieldName::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for Fieldgate operations.
pub type FieldgateResult<T> = Result<T, FieldgateError>;

/// Result type alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Result type alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

// ============================================================================
// Field Errors
// ============================================================================

/// Machine-readable category of a field error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Required field is blank.
    Required,
    Length,
    Number,
    Inclusion,
    Exclusion,
    Format,
    Acceptance,
    /// Raised by an application validator.
    Custom,
}

impl ErrorKind {
    /// Stable code for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Required => "required",
            ErrorKind::Length => "length",
            ErrorKind::Number => "number",
            ErrorKind::Inclusion => "inclusion",
            ErrorKind::Exclusion => "exclusion",
            ErrorKind::Format => "format",
            ErrorKind::Acceptance => "acceptance",
            ErrorKind::Custom => "custom",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A single validation error attached to a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorMessage {
    /// Category of the failure.
    pub kind: ErrorKind,
    /// Human-readable message.
    pub message: String,
    /// Validator arguments relevant to the failure, for interpolation.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub meta: IndexMap<String, Value>,
}

impl ErrorMessage {
    /// Create an error message without metadata.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            meta: IndexMap::new(),
        }
    }

    /// Attach a metadata entry.
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// Check if this is a presence error.
    pub fn is_required(&self) -> bool {
        self.kind == ErrorKind::Required
    }
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
