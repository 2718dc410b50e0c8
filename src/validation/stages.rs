//! Individual pipeline stages.
//!
//! Each stage takes a draft by value and hands back the updated draft.

use crate::core::config::EngineConfig;
use crate::core::draft::DraftRecord;
use crate::core::error::{ErrorKind, ErrorMessage};
use crate::core::types::{Payload, Value};
use std::collections::HashSet;

/// Copies allow-listed payload entries into a draft's changes.
///
/// Entries whose key is not allowed are dropped. No other path lets payload
/// data reach the draft.
pub struct FieldExtractor<'a> {
    config: &'a EngineConfig,
}

impl<'a> FieldExtractor<'a> {
    /// Create an extractor using `config`.
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Set `changes[key] = payload[key]` for every payload key in `allowed`.
    ///
    /// Allowed keys missing from the payload leave the draft untouched.
    pub fn extract_allowed<S: AsRef<str>>(
        &self,
        mut draft: DraftRecord,
        payload: &Payload,
        allowed: &[S],
    ) -> DraftRecord {
        let allowed: HashSet<&str> = allowed.iter().map(|f| f.as_ref()).collect();
        let mut dropped = Vec::new();

        for (key, value) in payload.iter() {
            if !allowed.contains(key.as_str()) {
                dropped.push(key.as_str());
                continue;
            }

            let value = match value {
                Value::String(s) if s.is_empty() && self.config.empty_string_as_null => {
                    Value::Null
                }
                other => other.clone(),
            };

            if self.config.skip_unchanged && draft.base().get(key) == Some(&value) {
                draft.discard_change(key);
                continue;
            }

            draft.put_change(key.as_str(), value);
        }

        if !dropped.is_empty() {
            log::debug!(
                "Draft {}: dropped unpermitted key(s): {}",
                draft.id(),
                dropped.join(", ")
            );
        }

        draft
    }
}

/// Adds a `required` error for each required field that resolves to blank.
pub struct PresenceGate<'a> {
    config: &'a EngineConfig,
}

impl<'a> PresenceGate<'a> {
    /// Create a gate using `config`.
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Check each required field's effective value (change, else base).
    ///
    /// Existing errors are kept; duplicate names are checked once.
    pub fn require_present<S: AsRef<str>>(
        &self,
        mut draft: DraftRecord,
        required: &[S],
    ) -> DraftRecord {
        let mut seen = HashSet::new();

        for field in required.iter().map(|f| f.as_ref()) {
            if !seen.insert(field) {
                continue;
            }

            let missing = draft
                .value_of(field)
                .map_or(true, |value| value.is_blank(self.config.whitespace_is_blank));

            if missing {
                log::trace!("Draft {}: required field '{}' is blank", draft.id(), field);
                draft.add_error(
                    field,
                    ErrorMessage::new(ErrorKind::Required, self.config.required_message.clone())
                        .with_meta("validation", "required"),
                );
            }
        }

        draft
    }
}

/// [`FieldExtractor::extract_allowed`] with the default configuration.
pub fn extract_allowed<S: AsRef<str>>(
    draft: DraftRecord,
    payload: &Payload,
    allowed: &[S],
) -> DraftRecord {
    FieldExtractor::new(&EngineConfig::default()).extract_allowed(draft, payload, allowed)
}

/// [`PresenceGate::require_present`] with the default configuration.
pub fn require_present<S: AsRef<str>>(draft: DraftRecord, required: &[S]) -> DraftRecord {
    PresenceGate::new(&EngineConfig::default()).require_present(draft, required)
}
