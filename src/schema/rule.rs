//! Validation rules declared per field.

use crate::validators::args::ValidatorArgs;
use crate::validators::table::ValidatorId;
use serde::{Deserialize, Serialize};

/// What to run against a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationRule {
    /// A validator with no arguments.
    Single(ValidatorId),
    /// A validator with static arguments.
    WithArgs(ValidatorId, ValidatorArgs),
    /// Several `Single`/`WithArgs` rules applied in order.
    List(Vec<ValidationRule>),
}

impl ValidationRule {
    /// A validator with no arguments.
    pub fn single(id: impl Into<ValidatorId>) -> Self {
        ValidationRule::Single(id.into())
    }

    /// A validator with arguments.
    pub fn with_args(id: impl Into<ValidatorId>, args: ValidatorArgs) -> Self {
        ValidationRule::WithArgs(id.into(), args)
    }

    /// An ordered list of rules.
    pub fn list(rules: impl IntoIterator<Item = ValidationRule>) -> Self {
        ValidationRule::List(rules.into_iter().collect())
    }

    /// Validator IDs referenced by this rule, in execution order.
    pub fn validator_ids(&self) -> Vec<&ValidatorId> {
        match self {
            ValidationRule::Single(id) | ValidationRule::WithArgs(id, _) => vec![id],
            ValidationRule::List(rules) => rules.iter().flat_map(|r| r.validator_ids()).collect(),
        }
    }
}

impl From<&str> for ValidationRule {
    fn from(id: &str) -> Self {
        ValidationRule::single(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validator_ids_in_order() {
        let rule = ValidationRule::list([
            ValidationRule::single("not_blank"),
            ValidationRule::with_args("length", ValidatorArgs::new().with("max", 20i64)),
        ]);
        let ids: Vec<_> = rule.validator_ids().iter().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["not_blank", "length"]);
    }

    #[test]
    fn test_serialized_shape() {
        let rule = ValidationRule::with_args("length", ValidatorArgs::new().with("min", 1i64));
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json, serde_json::json!({"with_args": ["length", {"min": 1}]}));
    }
}
