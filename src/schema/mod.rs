//! Per-record-type validator declarations.
//!
//! - [`rule`]: the rule shapes a field can declare
//! - [`registry`]: the append-then-freeze registry and its builder
//! - [`catalog`]: process-wide registries keyed by record type

pub mod catalog;
pub mod registry;
pub mod rule;

pub use catalog::{OwnedPipeline, RecordType, RegistryCatalog};
pub use registry::{BoundValidator, RegistryBuilder, RegistryEntry, ValidatorRegistry};
pub use rule::ValidationRule;
