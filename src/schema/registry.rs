//! Per-record-type validator registry.
//!
//! A [`RegistryBuilder`] collects `(field, rule)` declarations while a record
//! type is being defined. [`RegistryBuilder::build`] resolves every validator
//! identity against a [`ValidatorTable`] and freezes the result into a
//! [`ValidatorRegistry`], which has no mutating methods.

use crate::core::draft::DraftRecord;
use crate::core::error::{RegistryError, RegistryResult};
use crate::core::types::FieldName;
use crate::schema::rule::ValidationRule;
use crate::validators::args::ValidatorArgs;
use crate::validators::table::{ValidatorFn, ValidatorId, ValidatorTable};
use indexmap::IndexSet;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// A validator resolved from the table, with its captured arguments.
#[derive(Clone)]
pub struct BoundValidator {
    id: ValidatorId,
    args: Option<ValidatorArgs>,
    func: ValidatorFn,
}

impl BoundValidator {
    /// Validator identity.
    pub fn id(&self) -> &ValidatorId {
        &self.id
    }

    /// Captured arguments.
    pub fn args(&self) -> Option<&ValidatorArgs> {
        self.args.as_ref()
    }

    /// Run the validator against `field`.
    pub fn invoke(&self, draft: DraftRecord, field: &FieldName) -> DraftRecord {
        (self.func)(draft, field, self.args.as_ref())
    }
}

impl fmt::Debug for BoundValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundValidator")
            .field("id", &self.id)
            .field("args", &self.args)
            .field("func", &"<fn>")
            .finish()
    }
}

/// One declared rule on one field.
#[derive(Debug, Clone, Serialize)]
pub struct RegistryEntry {
    /// Field the rule applies to.
    pub field: FieldName,
    /// The rule as declared.
    pub rule: ValidationRule,
    /// The rule's validators, resolved, in execution order.
    #[serde(skip)]
    steps: Vec<BoundValidator>,
}

impl RegistryEntry {
    /// Resolved validators in execution order.
    pub fn steps(&self) -> &[BoundValidator] {
        &self.steps
    }
}

/// Frozen, ordered validator declarations for one record type.
#[derive(Debug, Clone, Serialize)]
pub struct ValidatorRegistry {
    record_type: String,
    entries: Vec<RegistryEntry>,
}

impl ValidatorRegistry {
    /// Name of the record type.
    pub fn record_type(&self) -> &str {
        &self.record_type
    }

    /// All entries in registration order ("list declared validators").
    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// Entries whose field is in `fields`, in registration order.
    pub fn entries_for<S: AsRef<str>>(&self, fields: &[S]) -> Vec<&RegistryEntry> {
        let selected: HashSet<&str> = fields.iter().map(|f| f.as_ref()).collect();
        self.entries
            .iter()
            .filter(|entry| selected.contains(entry.field.as_str()))
            .collect()
    }

    /// Rules declared on one field, in registration order.
    pub fn rules_for(&self, field: &str) -> Vec<&ValidationRule> {
        self.entries
            .iter()
            .filter(|entry| entry.field.as_str() == field)
            .map(|entry| &entry.rule)
            .collect()
    }

    /// Check if any rule is declared on `field`.
    pub fn declares(&self, field: &str) -> bool {
        self.entries.iter().any(|entry| entry.field.as_str() == field)
    }

    /// Distinct declared fields, in order of first registration.
    pub fn fields(&self) -> IndexSet<FieldName> {
        self.entries.iter().map(|entry| entry.field.clone()).collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no rules are declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collects declarations for a record type before it is frozen.
#[derive(Debug, Clone)]
pub struct RegistryBuilder {
    record_type: String,
    declarations: Vec<(FieldName, ValidationRule)>,
}

impl RegistryBuilder {
    /// Start declaring validators for `record_type`.
    pub fn new(record_type: impl Into<String>) -> Self {
        Self {
            record_type: record_type.into(),
            declarations: Vec::new(),
        }
    }

    /// Append a rule for `field`. Repeated fields accumulate.
    pub fn register(
        &mut self,
        field: impl Into<FieldName>,
        rule: impl Into<ValidationRule>,
    ) -> &mut Self {
        self.declarations.push((field.into(), rule.into()));
        self
    }

    /// Append a validator with no arguments.
    pub fn validates(
        &mut self,
        field: impl Into<FieldName>,
        validator: impl Into<ValidatorId>,
    ) -> &mut Self {
        self.register(field, ValidationRule::single(validator))
    }

    /// Append a validator with arguments.
    pub fn validates_with(
        &mut self,
        field: impl Into<FieldName>,
        validator: impl Into<ValidatorId>,
        args: ValidatorArgs,
    ) -> &mut Self {
        self.register(field, ValidationRule::with_args(validator, args))
    }

    /// Number of declarations so far.
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Check if nothing has been declared.
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Resolve every declaration against `table` and freeze the registry.
    pub fn build(self, table: &ValidatorTable) -> RegistryResult<ValidatorRegistry> {
        let mut entries = Vec::with_capacity(self.declarations.len());

        for (field, rule) in self.declarations {
            if field.as_str().is_empty() {
                return Err(RegistryError::EmptyFieldName {
                    record_type: self.record_type,
                });
            }

            let steps = resolve(&self.record_type, &field, &rule, table, false)?;
            entries.push(RegistryEntry { field, rule, steps });
        }

        let registry = ValidatorRegistry {
            record_type: self.record_type,
            entries,
        };
        log::debug!(
            "Defined {} with {} validator entr(ies) over {} field(s)",
            registry.record_type,
            registry.len(),
            registry.fields().len()
        );
        Ok(registry)
    }
}

fn resolve(
    record_type: &str,
    field: &FieldName,
    rule: &ValidationRule,
    table: &ValidatorTable,
    nested: bool,
) -> RegistryResult<Vec<BoundValidator>> {
    let bind = |id: &ValidatorId, args: Option<&ValidatorArgs>| -> RegistryResult<BoundValidator> {
        let func = table
            .get(id.as_str())
            .ok_or_else(|| RegistryError::UnknownValidator {
                record_type: record_type.to_string(),
                field: field.to_string(),
                validator: id.to_string(),
            })?;
        Ok(BoundValidator {
            id: id.clone(),
            args: args.cloned(),
            func: func.clone(),
        })
    };

    match rule {
        ValidationRule::Single(id) => Ok(vec![bind(id, None)?]),
        ValidationRule::WithArgs(id, args) => Ok(vec![bind(id, Some(args))?]),
        ValidationRule::List(_) if nested => Err(RegistryError::NestedRuleList {
            record_type: record_type.to_string(),
            field: field.to_string(),
        }),
        ValidationRule::List(rules) => {
            let mut steps = Vec::with_capacity(rules.len());
            for inner in rules {
                steps.extend(resolve(record_type, field, inner, table, true)?);
            }
            Ok(steps)
        }
    }
}
