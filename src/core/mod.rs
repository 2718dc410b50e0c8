//! Core types for the Fieldgate engine.
//!
//! This module contains the data the pipeline operates on:
//! - Dynamic values, records and payloads
//! - Draft records and field errors
//! - Error types for wiring faults
//! - Engine configuration

pub mod config;
pub mod draft;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{EngineConfig, RulePolicy};
pub use draft::DraftRecord;
pub use error::{
    ConfigError, DraftId, ErrorKind, ErrorMessage, FieldgateError, InvalidDraft, RegistryError,
};
pub use types::{FieldName, Payload, Record, Value};
