//! Pipeline facade composing extraction, presence and selective validation.

use crate::core::config::EngineConfig;
use crate::core::draft::DraftRecord;
use crate::core::types::Payload;
use crate::schema::registry::ValidatorRegistry;
use crate::validation::runner::SelectiveRunner;
use crate::validation::stages::{FieldExtractor, PresenceGate};
use indexmap::IndexSet;

/// The permit pipeline for one record type.
///
/// Every operation is total: failures are reported only as errors on the
/// returned draft.
pub struct Pipeline<'a> {
    registry: &'a ValidatorRegistry,
    config: &'a EngineConfig,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline over `registry` with `config`.
    pub fn new(registry: &'a ValidatorRegistry, config: &'a EngineConfig) -> Self {
        Self { registry, config }
    }

    /// The registry this pipeline validates against.
    pub fn registry(&self) -> &ValidatorRegistry {
        self.registry
    }

    /// Run the validators declared on `fields`, and only those.
    pub fn validate_fields<S: AsRef<str>>(&self, draft: DraftRecord, fields: &[S]) -> DraftRecord {
        SelectiveRunner::new(self.registry)
            .with_policy(self.config.rule_policy)
            .run(draft, fields)
    }

    /// Require `required` to be present, then validate `required ∪ optional`.
    pub fn fetch<S: AsRef<str>>(
        &self,
        draft: DraftRecord,
        required: &[S],
        optional: &[S],
    ) -> DraftRecord {
        for field in required.iter().map(|f| f.as_ref()) {
            if !self.registry.declares(field) {
                log::debug!(
                    "{}: required field '{}' has no declared validators",
                    self.registry.record_type(),
                    field
                );
            }
        }

        let draft = PresenceGate::new(self.config).require_present(draft, required);
        self.validate_fields(draft, &union(required, optional))
    }

    /// Permit `fields` from `payload`, all of them required, then validate them.
    pub fn cast_only<S: AsRef<str>>(
        &self,
        draft: DraftRecord,
        payload: &Payload,
        fields: &[S],
    ) -> DraftRecord {
        let draft = FieldExtractor::new(self.config).extract_allowed(draft, payload, fields);
        let draft = self.fetch(draft, fields, &[]);
        self.log_outcome("cast_only", &draft);
        draft
    }

    /// Permit and require `required`, with no optional fields.
    pub fn permit<S: AsRef<str>>(
        &self,
        draft: DraftRecord,
        payload: &Payload,
        required: &[S],
    ) -> DraftRecord {
        self.permit_with(draft, payload, required, &[])
    }

    /// Permit `required ∪ optional` from `payload`, require `required`, and
    /// validate both sets.
    pub fn permit_with<S: AsRef<str>>(
        &self,
        draft: DraftRecord,
        payload: &Payload,
        required: &[S],
        optional: &[S],
    ) -> DraftRecord {
        let allowed = union(required, optional);
        let draft = FieldExtractor::new(self.config).extract_allowed(draft, payload, &allowed);
        let draft = self.fetch(draft, required, optional);
        self.log_outcome("permit", &draft);
        draft
    }

    fn log_outcome(&self, operation: &str, draft: &DraftRecord) {
        log::debug!(
            "Draft {} [{}] {}: {} change(s), {} error(s)",
            draft.id(),
            self.registry.record_type(),
            operation,
            draft.changes().len(),
            draft.error_count()
        );
    }
}

/// Distinct names from `a` then `b`, keeping first occurrence order.
fn union<'s, S: AsRef<str>>(a: &'s [S], b: &'s [S]) -> Vec<&'s str> {
    a.iter()
        .chain(b)
        .map(|f| f.as_ref())
        .collect::<IndexSet<&str>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::RulePolicy;
    use crate::core::error::ErrorKind;
    use crate::core::types::{Record, Value};
    use crate::schema::registry::RegistryBuilder;
    use crate::validators::{ValidatorArgs, ValidatorTable};

    fn user_registry() -> ValidatorRegistry {
        let mut builder = RegistryBuilder::new("user");
        builder
            .validates_with(
                "name",
                "length",
                ValidatorArgs::new().with("min", 1i64).with("max", 20i64),
            )
            .validates_with("age", "number", ValidatorArgs::new().with("greater_than", 0i64));
        builder.build(&ValidatorTable::with_builtins()).unwrap()
    }

    #[test]
    fn test_union_dedups_in_order() {
        assert_eq!(union(&["a", "b"], &["b", "c", "a"]), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_permit_valid() {
        let registry = user_registry();
        let config = EngineConfig::default();
        let pipeline = Pipeline::new(&registry, &config);

        let draft = pipeline.permit(DraftRecord::blank(), &Payload::new().with("name", "Al"), &["name"]);
        assert!(draft.is_valid());
        assert_eq!(draft.change("name"), Some(&Value::from("Al")));
    }

    #[test]
    fn test_permit_with_optional_validates_optional_without_requiring_it() {
        let registry = user_registry();
        let config = EngineConfig::default();
        let pipeline = Pipeline::new(&registry, &config);

        let draft = pipeline.permit_with(
            DraftRecord::blank(),
            &Payload::new().with("name", "Al"),
            &["name"],
            &["age"],
        );
        assert!(draft.is_valid());

        let draft = pipeline.permit_with(
            DraftRecord::blank(),
            &Payload::new().with("name", "Al").with("age", -1i64),
            &["name"],
            &["age"],
        );
        assert_eq!(draft.errors_on("age")[0].kind, ErrorKind::Number);
    }

    #[test]
    fn test_cast_only_requires_every_field() {
        let registry = user_registry();
        let config = EngineConfig::default();
        let pipeline = Pipeline::new(&registry, &config);

        let draft = pipeline.cast_only(
            DraftRecord::blank(),
            &Payload::new().with("name", "Al"),
            &["name", "age"],
        );
        assert!(draft.errors_on("age")[0].is_required());
        assert!(!draft.has_errors_on("name"));
    }

    #[test]
    fn test_fetch_uses_base_record() {
        let registry = user_registry();
        let config = EngineConfig::default();
        let pipeline = Pipeline::new(&registry, &config);

        let draft = DraftRecord::new(Record::new().with("name", "A".repeat(21)));
        let draft = pipeline.fetch(draft, &["name"], &[]);
        assert_eq!(draft.errors_on("name")[0].kind, ErrorKind::Length);
    }

    #[test]
    fn test_empty_required_field_gets_both_errors_under_run_all() {
        let registry = user_registry();
        let config = EngineConfig::default();
        let draft = Pipeline::new(&registry, &config).permit(
            DraftRecord::blank(),
            &Payload::new().with("name", ""),
            &["name"],
        );

        let kinds: Vec<_> = draft.errors_on("name").iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![ErrorKind::Required, ErrorKind::Length]);
    }

    #[test]
    fn test_halt_policy_keeps_only_presence_error() {
        let registry = user_registry();
        let config = EngineConfig::default().with_rule_policy(RulePolicy::HaltFieldOnError);
        let draft = Pipeline::new(&registry, &config).permit(
            DraftRecord::blank(),
            &Payload::new().with("name", ""),
            &["name"],
        );

        let kinds: Vec<_> = draft.errors_on("name").iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![ErrorKind::Required]);
    }
}
