//! Validator table mapping validator identities to invocable functions.

use crate::core::draft::DraftRecord;
use crate::core::types::FieldName;
use crate::validators::args::ValidatorArgs;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A validator: takes a draft and returns it, possibly with errors added
/// for `field`.
pub type ValidatorFn =
    Arc<dyn Fn(DraftRecord, &FieldName, Option<&ValidatorArgs>) -> DraftRecord + Send + Sync>;

/// Stable identity of a validator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidatorId(String);

impl ValidatorId {
    /// Create a validator ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ValidatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ValidatorId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ValidatorId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Table of available validators.
///
/// Record types refer to validators by [`ValidatorId`]; the table resolves
/// those identities once, when a record type's registry is built.
#[derive(Clone, Default)]
pub struct ValidatorTable {
    validators: IndexMap<String, ValidatorFn>,
}

impl ValidatorTable {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self {
            validators: IndexMap::new(),
        }
    }

    /// Create a table pre-populated with the built-in validators.
    pub fn with_builtins() -> Self {
        let mut table = Self::new();
        crate::validators::builtin::register_all(&mut table);
        table
    }

    /// Register a validator under `id`, replacing any previous one.
    pub fn register<F>(&mut self, id: impl Into<ValidatorId>, validator: F)
    where
        F: Fn(DraftRecord, &FieldName, Option<&ValidatorArgs>) -> DraftRecord
            + Send
            + Sync
            + 'static,
    {
        let id = id.into();
        if self
            .validators
            .insert(id.0.clone(), Arc::new(validator))
            .is_some()
        {
            log::debug!("Validator '{}' replaced", id);
        }
    }

    /// Look up a validator.
    pub fn get(&self, id: &str) -> Option<&ValidatorFn> {
        self.validators.get(id)
    }

    /// Check if a validator is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.validators.contains_key(id)
    }

    /// Registered validator IDs, in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.validators.keys().map(|s| s.as_str())
    }

    /// Number of registered validators.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl fmt::Debug for ValidatorTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorTable")
            .field("validators", &self.validators.keys().collect::<Vec<_>>())
            .finish()
    }
}
