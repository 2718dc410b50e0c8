//! Length validator for strings, arrays and maps.

use super::check_value;
use crate::core::draft::DraftRecord;
use crate::core::error::{ErrorKind, ErrorMessage};
use crate::core::types::{FieldName, Value};
use crate::validators::args::ValidatorArgs;
use crate::validators::table::ValidatorTable;

/// Register the length validator.
pub fn register(table: &mut ValidatorTable) {
    table.register("length", validate_length);
}

/// Validate the length of a field.
///
/// Arguments: `is`, `min`, `max` (integers). Strings are counted in chars.
/// At most one error is added; `is` is checked first, then `min`, then `max`.
pub fn validate_length(
    draft: DraftRecord,
    field: &FieldName,
    args: Option<&ValidatorArgs>,
) -> DraftRecord {
    check_value(draft, field, args, check_length)
}

fn check_length(value: &Value, args: &ValidatorArgs) -> Option<ErrorMessage> {
    let Some(len) = value.length() else {
        return Some(
            ErrorMessage::new(ErrorKind::Length, "must be a string, array or map")
                .with_meta("type", value.type_name()),
        );
    };
    let len = len as i64;
    let unit = match value {
        Value::String(_) => "character(s)",
        _ => "item(s)",
    };

    if let Some(exact) = args.integer("is") {
        if len != exact {
            return Some(
                ErrorMessage::new(ErrorKind::Length, format!("should be {} {}", exact, unit))
                    .with_meta("validation", "is")
                    .with_meta("count", exact),
            );
        }
    }

    if let Some(min) = args.integer("min") {
        if len < min {
            return Some(
                ErrorMessage::new(
                    ErrorKind::Length,
                    format!("should be at least {} {}", min, unit),
                )
                .with_meta("validation", "min")
                .with_meta("count", min),
            );
        }
    }

    if let Some(max) = args.integer("max") {
        if len > max {
            return Some(
                ErrorMessage::new(
                    ErrorKind::Length,
                    format!("should be at most {} {}", max, unit),
                )
                .with_meta("validation", "max")
                .with_meta("count", max),
            );
        }
    }

    None
}
