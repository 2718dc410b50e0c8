//! Draft records: the value threaded through every pipeline stage.
//!
//! A draft wraps a base record with proposed changes and the field errors
//! accumulated so far. It is created per request and handed back to the
//! caller once the pipeline finishes.

use crate::core::error::{DraftId, ErrorMessage, InvalidDraft};
use crate::core::types::{FieldName, Record, Value};
use indexmap::IndexMap;
use serde::Serialize;

/// In-flight validation state for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftRecord {
    id: DraftId,
    base: Record,
    changes: IndexMap<FieldName, Value>,
    errors: IndexMap<FieldName, Vec<ErrorMessage>>,
}

impl DraftRecord {
    /// Start a draft over a base record.
    pub fn new(base: Record) -> Self {
        Self {
            id: DraftId::new(),
            base,
            changes: IndexMap::new(),
            errors: IndexMap::new(),
        }
    }

    /// Start a draft over an empty record (an insert rather than an update).
    pub fn blank() -> Self {
        Self::new(Record::new())
    }

    /// Log correlation ID.
    pub fn id(&self) -> DraftId {
        self.id
    }

    /// The base record.
    pub fn base(&self) -> &Record {
        &self.base
    }

    /// Proposed changes, in the order they were made.
    pub fn changes(&self) -> &IndexMap<FieldName, Value> {
        &self.changes
    }

    /// Get a proposed change.
    pub fn change(&self, field: &str) -> Option<&Value> {
        self.changes.get(field)
    }

    /// Effective value of a field: the proposed change if any, else the base value.
    pub fn value_of(&self, field: &str) -> Option<&Value> {
        self.changes.get(field).or_else(|| self.base.get(field))
    }

    /// Record a proposed change.
    ///
    /// Stages call this only for permitted fields; validators only for the
    /// field they were invoked on.
    pub fn put_change(&mut self, field: impl Into<FieldName>, value: impl Into<Value>) {
        self.changes.insert(field.into(), value.into());
    }

    /// Drop a proposed change so the field falls back to its base value.
    pub fn discard_change(&mut self, field: &str) -> Option<Value> {
        self.changes.shift_remove(field)
    }

    /// All accumulated errors, grouped by field.
    pub fn errors(&self) -> &IndexMap<FieldName, Vec<ErrorMessage>> {
        &self.errors
    }

    /// Errors on one field (empty if none).
    pub fn errors_on(&self, field: &str) -> &[ErrorMessage] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check if a field has any error.
    pub fn has_errors_on(&self, field: &str) -> bool {
        !self.errors_on(field).is_empty()
    }

    /// Append an error to a field.
    pub fn add_error(&mut self, field: impl Into<FieldName>, error: ErrorMessage) {
        self.errors.entry(field.into()).or_default().push(error);
    }

    /// Builder-style variant of [`add_error`](Self::add_error).
    pub fn with_error(mut self, field: impl Into<FieldName>, error: ErrorMessage) -> Self {
        self.add_error(field, error);
        self
    }

    /// A draft is valid iff no field has an error.
    pub fn is_valid(&self) -> bool {
        self.errors.values().all(Vec::is_empty)
    }

    /// Total number of errors across all fields.
    pub fn error_count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    /// Fields with at least one error.
    pub fn failing_fields(&self) -> Vec<FieldName> {
        self.errors
            .iter()
            .filter(|(_, errors)| !errors.is_empty())
            .map(|(field, _)| field.clone())
            .collect()
    }

    /// Human-readable messages prefixed with their field name.
    pub fn full_messages(&self) -> Vec<String> {
        self.errors
            .iter()
            .flat_map(|(field, errors)| {
                errors
                    .iter()
                    .map(move |error| format!("{} {}", field, error.message))
            })
            .collect()
    }

    /// Merge the changes over the base record.
    ///
    /// This is the hand-off to storage: only a valid draft produces a record.
    pub fn apply(self) -> Result<Record, InvalidDraft> {
        if !self.is_valid() {
            return Err(InvalidDraft {
                fields: self.failing_fields(),
            });
        }

        let mut record = self.base;
        for (field, value) in self.changes {
            record.set(field, value);
        }
        Ok(record)
    }
}

impl Default for DraftRecord {
    fn default() -> Self {
        Self::blank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;

    #[test]
    fn test_value_of_prefers_changes() {
        let mut draft = DraftRecord::new(Record::new().with("name", "Old").with("age", 30i64));
        draft.put_change("name", "New");

        assert_eq!(draft.value_of("name"), Some(&Value::from("New")));
        assert_eq!(draft.value_of("age"), Some(&Value::Integer(30)));
        assert_eq!(draft.value_of("missing"), None);
    }

    #[test]
    fn test_discard_change_falls_back_to_base() {
        let mut draft = DraftRecord::new(Record::new().with("name", "Old"));
        draft.put_change("name", "New");

        assert_eq!(draft.discard_change("name"), Some(Value::from("New")));
        assert_eq!(draft.value_of("name"), Some(&Value::from("Old")));
        assert_eq!(draft.discard_change("name"), None);
    }

    #[test]
    fn test_errors_accumulate_per_field() {
        let mut draft = DraftRecord::blank();
        assert!(draft.is_valid());

        draft.add_error("name", ErrorMessage::new(ErrorKind::Required, "can't be blank"));
        draft.add_error("name", ErrorMessage::new(ErrorKind::Length, "is too short"));
        draft.add_error("age", ErrorMessage::new(ErrorKind::Number, "must be a number"));

        assert!(!draft.is_valid());
        assert_eq!(draft.error_count(), 3);
        assert_eq!(draft.errors_on("name")[1].kind, ErrorKind::Length);
        assert_eq!(
            draft.failing_fields(),
            vec![FieldName::from("name"), FieldName::from("age")]
        );
        assert_eq!(draft.full_messages()[0], "name can't be blank");
    }

    #[test]
    fn test_apply_valid_draft_merges_changes() {
        let mut draft = DraftRecord::new(Record::new().with("name", "Old").with("age", 30i64));
        draft.put_change("name", "New");

        let record = draft.apply().unwrap();
        assert_eq!(record.get("name"), Some(&Value::from("New")));
        assert_eq!(record.get("age"), Some(&Value::Integer(30)));
    }

    #[test]
    fn test_apply_invalid_draft_fails() {
        let draft = DraftRecord::blank()
            .with_error("name", ErrorMessage::new(ErrorKind::Required, "can't be blank"));

        let err = draft.apply().unwrap_err();
        assert_eq!(err.fields, vec![FieldName::from("name")]);
    }
}
