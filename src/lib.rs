//! # Fieldgate - Declarative Field Validation
//!
//! Fieldgate lets a record type declare, once, which validators apply to which
//! fields. Each call site then picks which fields a payload may set, which of
//! them must be present, and which declared validators run.
//!
//! ## Features
//!
//! - **Strong parameters**: only allow-listed payload keys reach a draft
//! - **Selective validation**: only validators on requested fields run
//! - **Frozen registries**: declarations are resolved once and shared read-only
//! - **Total pipelines**: bad input produces field errors, never a panic
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fieldgate::prelude::*;
//!
//! struct User;
//!
//! impl RecordType for User {
//!     const NAME: &'static str = "user";
//!
//!     fn define(schema: &mut RegistryBuilder) {
//!         schema
//!             .validates_with("name", "length", ValidatorArgs::new().with("min", 1i64).with("max", 20i64))
//!             .validates_with("age", "number", ValidatorArgs::new().with("greater_than", 0i64));
//!     }
//! }
//!
//! let payload = Payload::new().with("name", "Al").with("admin", true);
//! let draft = User::permit_with(DraftRecord::blank(), &payload, &["name"], &["age"]);
//!
//! assert!(draft.is_valid());
//! assert!(draft.change("admin").is_none());
//! let record = draft.apply()?;
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: values, records, drafts, errors and configuration
//! - [`validators`]: the validator table and built-in validators
//! - [`schema`]: per-record-type registries and the global catalog
//! - [`validation`]: extraction, presence and selective validation stages

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod core;
pub mod schema;
pub mod validation;
pub mod validators;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use fieldgate::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use crate::core::types::{FieldName, Payload, Record, Value};
    pub use crate::core::draft::DraftRecord;
    pub use crate::core::config::{EngineConfig, RulePolicy};

    // Errors
    pub use crate::core::error::{
        ConfigError, DraftId, ErrorKind, ErrorMessage, FieldgateError, FieldgateResult,
        InvalidDraft, RegistryError,
    };

    // Validators
    pub use crate::validators::{ValidatorArgs, ValidatorFn, ValidatorId, ValidatorTable};

    // Schema
    pub use crate::schema::{
        RecordType, RegistryBuilder, RegistryCatalog, RegistryEntry, ValidationRule,
        ValidatorRegistry,
    };

    // Pipeline
    pub use crate::validation::{FieldExtractor, Pipeline, PresenceGate, SelectiveRunner};
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
