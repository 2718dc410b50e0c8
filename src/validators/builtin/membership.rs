//! Inclusion and exclusion validators.

use super::check_value;
use crate::core::draft::DraftRecord;
use crate::core::error::{ErrorKind, ErrorMessage};
use crate::core::types::{FieldName, Value};
use crate::validators::args::ValidatorArgs;
use crate::validators::table::ValidatorTable;

/// Register membership validators.
pub fn register(table: &mut ValidatorTable) {
    table.register("inclusion", validate_inclusion);
    table.register("exclusion", validate_exclusion);
}

/// The value must be one of the `in` argument's items.
///
/// A missing `in` argument is treated as an empty list, so every value fails.
pub fn validate_inclusion(
    draft: DraftRecord,
    field: &FieldName,
    args: Option<&ValidatorArgs>,
) -> DraftRecord {
    check_value(draft, field, args, |value, args| {
        if options(args).contains(value) {
            None
        } else {
            Some(
                ErrorMessage::new(ErrorKind::Inclusion, "is invalid")
                    .with_meta("enum", Value::Array(options(args).to_vec())),
            )
        }
    })
}

/// The value must not be one of the `in` argument's items.
pub fn validate_exclusion(
    draft: DraftRecord,
    field: &FieldName,
    args: Option<&ValidatorArgs>,
) -> DraftRecord {
    check_value(draft, field, args, |value, args| {
        if options(args).contains(value) {
            Some(ErrorMessage::new(ErrorKind::Exclusion, "is reserved"))
        } else {
            None
        }
    })
}

fn options(args: &ValidatorArgs) -> &[Value] {
    args.array("in").unwrap_or(&[])
}
