//! Built-in validator implementations.
//!
//! These register through the same [`ValidatorTable`] API as application
//! validators. Every built-in skips fields whose effective value is absent or
//! null; presence is the presence gate's job.

mod format;
mod length;
mod membership;
mod number;

use crate::core::draft::DraftRecord;
use crate::core::error::ErrorMessage;
use crate::core::types::{FieldName, Value};
use crate::validators::args::ValidatorArgs;
use crate::validators::table::ValidatorTable;

/// Register all built-in validators.
pub fn register_all(table: &mut ValidatorTable) {
    length::register(table);
    number::register(table);
    membership::register(table);
    format::register(table);
}

// Re-export for direct access
pub use format::{validate_acceptance, validate_format, validate_not_blank};
pub use length::validate_length;
pub use membership::{validate_exclusion, validate_inclusion};
pub use number::validate_number;

/// Run `check` against the field's effective value and record its error.
fn check_value<F>(
    draft: DraftRecord,
    field: &FieldName,
    args: Option<&ValidatorArgs>,
    check: F,
) -> DraftRecord
where
    F: FnOnce(&Value, &ValidatorArgs) -> Option<ErrorMessage>,
{
    let empty = ValidatorArgs::new();
    let args = args.unwrap_or(&empty);

    let error = match draft.value_of(field.as_str()) {
        None | Some(Value::Null) => None,
        Some(value) => check(value, args).map(|error| with_message_override(error, args)),
    };

    match error {
        Some(error) => {
            log::trace!("Draft {}: '{}' failed {}", draft.id(), field, error.kind);
            draft.with_error(field, error)
        }
        None => draft,
    }
}

/// Apply a caller-supplied `message` argument, if any.
fn with_message_override(mut error: ErrorMessage, args: &ValidatorArgs) -> ErrorMessage {
    if let Some(message) = args.string("message") {
        error.message = message.to_string();
    }
    error
}
