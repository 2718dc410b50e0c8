//! Numeric comparison validator.

use super::check_value;
use crate::core::draft::DraftRecord;
use crate::core::error::{ErrorKind, ErrorMessage};
use crate::core::types::{FieldName, Value};
use crate::validators::args::ValidatorArgs;
use crate::validators::table::ValidatorTable;
use std::cmp::Ordering;

/// Register the number validator.
pub fn register(table: &mut ValidatorTable) {
    table.register("number", validate_number);
}

/// (argument name, passes, message prefix)
type Comparison = (&'static str, fn(Ordering) -> bool, &'static str);

const COMPARISONS: &[Comparison] = &[
    ("greater_than", Ordering::is_gt, "must be greater than"),
    ("greater_than_or_equal_to", Ordering::is_ge, "must be greater than or equal to"),
    ("less_than", Ordering::is_lt, "must be less than"),
    ("less_than_or_equal_to", Ordering::is_le, "must be less than or equal to"),
    ("equal_to", Ordering::is_eq, "must be equal to"),
];

/// Order `value` against `bound`.
///
/// Two integers compare exactly; anything else compares as `f64`.
fn compare(value: &Value, bound: &Value) -> Option<Ordering> {
    match (value, bound) {
        (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
        _ => value.as_float()?.partial_cmp(&bound.as_float()?),
    }
}

/// Validate a numeric field against the bounds given in `args`.
///
/// Non-numeric values fail with "must be a number". Only the first failing
/// comparison is reported.
pub fn validate_number(
    draft: DraftRecord,
    field: &FieldName,
    args: Option<&ValidatorArgs>,
) -> DraftRecord {
    check_value(draft, field, args, check_number)
}

fn check_number(value: &Value, args: &ValidatorArgs) -> Option<ErrorMessage> {
    if value.as_float().is_none() {
        return Some(
            ErrorMessage::new(ErrorKind::Number, "must be a number")
                .with_meta("type", value.type_name()),
        );
    }

    COMPARISONS.iter().find_map(|(name, passes, message)| {
        let bound = args.get(name)?;
        let Some(ordering) = compare(value, bound) else {
            log::warn!(
                "number: argument '{}' should be numeric, got {}; ignoring it",
                name,
                bound.type_name()
            );
            return None;
        };
        if passes(ordering) {
            None
        } else {
            Some(
                ErrorMessage::new(ErrorKind::Number, format!("{} {}", message, bound))
                    .with_meta("validation", *name)
                    .with_meta("number", bound.clone()),
            )
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(value: impl Into<Value>, args: ValidatorArgs) -> DraftRecord {
        let mut draft = DraftRecord::blank();
        draft.put_change("price", value);
        validate_number(draft, &FieldName::from("price"), Some(&args))
    }

    #[test]
    fn test_in_range() {
        let args = ValidatorArgs::new()
            .with("greater_than", 0i64)
            .with("less_than_or_equal_to", 100i64);
        assert!(run(42i64, args.clone()).is_valid());
        assert!(run(100.0, args).is_valid());
    }

    #[test]
    fn test_first_failure_reported() {
        let args = ValidatorArgs::new()
            .with("greater_than", 0i64)
            .with("less_than", 10i64);
        let draft = run(-5i64, args);

        let errors = draft.errors_on("price");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "must be greater than 0");
        assert_eq!(errors[0].meta["validation"], Value::from("greater_than"));
    }

    #[test]
    fn test_equal_to() {
        let args = ValidatorArgs::new().with("equal_to", 2.5);
        assert!(run(2.5, args.clone()).is_valid());
        assert_eq!(run(3i64, args).errors_on("price")[0].message, "must be equal to 2.5");
    }

    #[test]
    fn test_not_a_number() {
        let draft = run("12", ValidatorArgs::new());
        assert_eq!(draft.errors_on("price")[0].message, "must be a number");
    }

    #[test]
    fn test_large_integers_compare_exactly() {
        let bound = 1i64 << 53;
        let args = ValidatorArgs::new().with("greater_than", bound);
        assert!(run(bound + 1, args.clone()).is_valid());
        assert!(!run(bound, args).is_valid());

        let args = ValidatorArgs::new().with("equal_to", bound + 1);
        assert!(!run(bound, args.clone()).is_valid());
        assert!(run(bound + 1, args).is_valid());
    }

    #[test]
    fn test_non_numeric_bound_ignored() {
        let args = ValidatorArgs::new().with("greater_than", "3");
        assert!(run(1i64, args).is_valid());
    }
}
