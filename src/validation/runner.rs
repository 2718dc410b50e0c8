//! Selective validation: run only the rules declared on requested fields.

use crate::core::config::RulePolicy;
use crate::core::draft::DraftRecord;
use crate::schema::registry::ValidatorRegistry;

/// Runs a registry's validators for an explicit set of fields.
pub struct SelectiveRunner<'a> {
    registry: &'a ValidatorRegistry,
    policy: RulePolicy,
}

impl<'a> SelectiveRunner<'a> {
    /// Create a runner over `registry` using the default policy.
    pub fn new(registry: &'a ValidatorRegistry) -> Self {
        Self {
            registry,
            policy: RulePolicy::default(),
        }
    }

    /// Set the duplicate-rule policy.
    pub fn with_policy(mut self, policy: RulePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Thread `draft` through every validator declared on a field in `fields`.
    ///
    /// Validators run in registration order. Rules on other fields never run,
    /// and selected fields without rules are skipped.
    pub fn run<S: AsRef<str>>(&self, draft: DraftRecord, fields: &[S]) -> DraftRecord {
        let entries = self.registry.entries_for(fields);
        let mut draft = draft;
        let mut invoked = 0usize;

        for entry in entries {
            for step in entry.steps() {
                if self.policy == RulePolicy::HaltFieldOnError
                    && draft.has_errors_on(entry.field.as_str())
                {
                    log::trace!(
                        "Draft {}: skipping {} on '{}', field already failed",
                        draft.id(),
                        step.id(),
                        entry.field
                    );
                    continue;
                }

                log::trace!("Draft {}: running {} on '{}'", draft.id(), step.id(), entry.field);
                draft = step.invoke(draft, &entry.field);
                invoked += 1;
            }
        }

        log::debug!(
            "Draft {} [{}]: ran {} validator(s) over {} field(s)",
            draft.id(),
            self.registry.record_type(),
            invoked,
            fields.len()
        );
        draft
    }
}
