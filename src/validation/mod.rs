//! The permit pipeline.
//!
//! Extraction, then presence, then selective validation. Each step takes a
//! draft by value and returns it.

pub mod pipeline;
pub mod runner;
pub mod stages;

pub use pipeline::Pipeline;
pub use runner::SelectiveRunner;
pub use stages::{extract_allowed, require_present, FieldExtractor, PresenceGate};
