//! String format, acceptance and non-blank validators.

use super::check_value;
use crate::core::draft::DraftRecord;
use crate::core::error::{ErrorKind, ErrorMessage};
use crate::core::types::{FieldName, Value};
use crate::validators::args::ValidatorArgs;
use crate::validators::table::ValidatorTable;

/// Register format-style validators.
pub fn register(table: &mut ValidatorTable) {
    table.register("format", validate_format);
    table.register("acceptance", validate_acceptance);
    table.register("not_blank", validate_not_blank);
}

/// Check a string against `prefix`, `suffix` and `contains` arguments.
///
/// Substring checks only; there is no pattern language.
pub fn validate_format(
    draft: DraftRecord,
    field: &FieldName,
    args: Option<&ValidatorArgs>,
) -> DraftRecord {
    check_value(draft, field, args, |value, args| {
        let invalid = || Some(ErrorMessage::new(ErrorKind::Format, "has invalid format"));

        let Some(s) = value.as_str() else {
            return invalid();
        };
        if let Some(prefix) = args.string("prefix") {
            if !s.starts_with(prefix) {
                return invalid();
            }
        }
        if let Some(suffix) = args.string("suffix") {
            if !s.ends_with(suffix) {
                return invalid();
            }
        }
        if let Some(needle) = args.string("contains") {
            if !s.contains(needle) {
                return invalid();
            }
        }
        None
    })
}

/// The value must be boolean `true` (terms of service checkboxes and the like).
pub fn validate_acceptance(
    draft: DraftRecord,
    field: &FieldName,
    args: Option<&ValidatorArgs>,
) -> DraftRecord {
    check_value(draft, field, args, |value, _| match value {
        Value::Boolean(true) => None,
        _ => Some(ErrorMessage::new(ErrorKind::Acceptance, "must be accepted")),
    })
}

/// A value that is present must not be blank.
///
/// Unlike the presence gate this does nothing for absent fields, so it suits
/// optional fields that may be omitted but not emptied. Whitespace-only
/// strings count as blank unless the `whitespace_is_blank` argument is false.
pub fn validate_not_blank(
    draft: DraftRecord,
    field: &FieldName,
    args: Option<&ValidatorArgs>,
) -> DraftRecord {
    check_value(draft, field, args, |value, args| {
        let whitespace_is_blank = args.boolean("whitespace_is_blank").unwrap_or(true);
        if value.is_blank(whitespace_is_blank) {
            Some(ErrorMessage::new(ErrorKind::Required, "can't be blank"))
        } else {
            None
        }
    })
}
