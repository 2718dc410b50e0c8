//! Process-wide catalog of frozen registries, one per record type.
//!
//! A record type's registry is defined the first time it is requested (or
//! eagerly through [`RegistryCatalog::define`]) and never changes after that.
//! Definition happens under the catalog's write lock with a second lookup, so
//! concurrent first requests still run [`RecordType::define`] exactly once.

use crate::core::config::EngineConfig;
use crate::core::draft::DraftRecord;
use crate::core::error::RegistryResult;
use crate::core::types::Payload;
use crate::schema::registry::{RegistryBuilder, ValidatorRegistry};
use crate::validation::pipeline::Pipeline;
use crate::validators::table::ValidatorTable;
use parking_lot::RwLock;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

static GLOBAL: OnceLock<RegistryCatalog> = OnceLock::new();

/// A record type that declares its validators once.
///
/// The provided methods run the permit pipeline against the type's registry
/// in the global catalog.
///
/// # Panics
///
/// The provided methods panic if `define` references an unknown validator or
/// nests rule lists. That is a wiring defect, not bad input; call
/// [`RegistryCatalog::define`] at start-up to surface it as an error instead.
pub trait RecordType: Sized + 'static {
    /// Name used in logs and listings.
    const NAME: &'static str;

    /// Declare the type's validators.
    ///
    /// Must not access the catalog itself.
    fn define(schema: &mut RegistryBuilder);

    /// The type's frozen registry from the global catalog.
    fn registry() -> Arc<ValidatorRegistry> {
        match RegistryCatalog::global().registry::<Self>() {
            Ok(registry) => registry,
            Err(err) => panic!("{}", err),
        }
    }

    /// See [`Pipeline::validate_fields`].
    fn validate_fields<S: AsRef<str>>(draft: DraftRecord, fields: &[S]) -> DraftRecord {
        let registry = Self::registry();
        Pipeline::new(&registry, RegistryCatalog::global().config()).validate_fields(draft, fields)
    }

    /// See [`Pipeline::fetch`].
    fn fetch<S: AsRef<str>>(draft: DraftRecord, required: &[S], optional: &[S]) -> DraftRecord {
        let registry = Self::registry();
        Pipeline::new(&registry, RegistryCatalog::global().config()).fetch(draft, required, optional)
    }

    /// See [`Pipeline::cast_only`].
    fn cast_only<S: AsRef<str>>(draft: DraftRecord, payload: &Payload, fields: &[S]) -> DraftRecord {
        let registry = Self::registry();
        Pipeline::new(&registry, RegistryCatalog::global().config()).cast_only(draft, payload, fields)
    }

    /// See [`Pipeline::permit`].
    fn permit<S: AsRef<str>>(draft: DraftRecord, payload: &Payload, required: &[S]) -> DraftRecord {
        let registry = Self::registry();
        Pipeline::new(&registry, RegistryCatalog::global().config()).permit(draft, payload, required)
    }

    /// See [`Pipeline::permit_with`].
    fn permit_with<S: AsRef<str>>(
        draft: DraftRecord,
        payload: &Payload,
        required: &[S],
        optional: &[S],
    ) -> DraftRecord {
        let registry = Self::registry();
        Pipeline::new(&registry, RegistryCatalog::global().config())
            .permit_with(draft, payload, required, optional)
    }
}

/// Registries keyed by record type, plus the validator table they resolve against.
pub struct RegistryCatalog {
    table: ValidatorTable,
    config: EngineConfig,
    registries: RwLock<HashMap<TypeId, Arc<ValidatorRegistry>>>,
}

impl RegistryCatalog {
    /// Create a catalog resolving validators from `table`.
    pub fn new(table: ValidatorTable) -> Self {
        Self {
            table,
            config: EngineConfig::default(),
            registries: RwLock::new(HashMap::new()),
        }
    }

    /// Set the engine configuration used by pipelines built from this catalog.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// The process-wide catalog.
    ///
    /// Uses the catalog passed to [`install`](Self::install) if that happened
    /// first, otherwise a catalog with the built-in validators and default
    /// configuration.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(|| Self::new(ValidatorTable::with_builtins()))
    }

    /// Install the process-wide catalog.
    ///
    /// Only possible before the first call to [`global`](Self::global); the
    /// catalog is handed back otherwise.
    pub fn install(catalog: RegistryCatalog) -> Result<(), RegistryCatalog> {
        GLOBAL.set(catalog)
    }

    /// The validator table.
    pub fn table(&self) -> &ValidatorTable {
        &self.table
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get the registry for `T`, defining it on first request.
    pub fn registry<T: RecordType>(&self) -> RegistryResult<Arc<ValidatorRegistry>> {
        let key = TypeId::of::<T>();

        if let Some(registry) = self.registries.read().get(&key) {
            return Ok(Arc::clone(registry));
        }

        let mut registries = self.registries.write();
        if let Some(registry) = registries.get(&key) {
            return Ok(Arc::clone(registry));
        }

        let mut builder = RegistryBuilder::new(T::NAME);
        T::define(&mut builder);
        let registry = Arc::new(builder.build(&self.table)?);
        registries.insert(key, Arc::clone(&registry));
        Ok(registry)
    }

    /// Define `T` now, surfacing wiring faults as errors.
    pub fn define<T: RecordType>(&self) -> RegistryResult<()> {
        self.registry::<T>().map(|_| ())
    }

    /// Check if `T` has been defined.
    pub fn is_defined<T: RecordType>(&self) -> bool {
        self.registries.read().contains_key(&TypeId::of::<T>())
    }

    /// A pipeline for `T` using this catalog's configuration.
    pub fn pipeline<T: RecordType>(&self) -> RegistryResult<OwnedPipeline<'_>> {
        Ok(OwnedPipeline {
            registry: self.registry::<T>()?,
            config: &self.config,
        })
    }

    /// Names of the defined record types, sorted.
    pub fn record_types(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .registries
            .read()
            .values()
            .map(|registry| registry.record_type().to_string())
            .collect();
        names.sort();
        names
    }

    /// Number of defined record types.
    pub fn len(&self) -> usize {
        self.registries.read().len()
    }

    /// Check if no record type has been defined.
    pub fn is_empty(&self) -> bool {
        self.registries.read().is_empty()
    }
}

impl Default for RegistryCatalog {
    fn default() -> Self {
        Self::new(ValidatorTable::with_builtins())
    }
}

/// A registry handle paired with its catalog's configuration.
pub struct OwnedPipeline<'c> {
    registry: Arc<ValidatorRegistry>,
    config: &'c EngineConfig,
}

impl OwnedPipeline<'_> {
    /// Borrow as a [`Pipeline`].
    pub fn get(&self) -> Pipeline<'_> {
        Pipeline::new(&self.registry, self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::ValidatorArgs;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static GADGET_DEFINITIONS: AtomicUsize = AtomicUsize::new(0);

    struct Widget;

    impl RecordType for Widget {
        const NAME: &'static str = "widget";

        fn define(schema: &mut RegistryBuilder) {
            schema.validates_with("name", "length", ValidatorArgs::new().with("max", 3i64));
        }
    }

    struct Gadget;

    impl RecordType for Gadget {
        const NAME: &'static str = "gadget";

        fn define(schema: &mut RegistryBuilder) {
            GADGET_DEFINITIONS.fetch_add(1, Ordering::SeqCst);
            schema.validates("serial", "not_blank");
        }
    }

    struct Broken;

    impl RecordType for Broken {
        const NAME: &'static str = "broken";

        fn define(schema: &mut RegistryBuilder) {
            schema.validates("name", "uniqueness");
        }
    }

    #[test]
    fn test_defined_once_across_threads() {
        let catalog = Arc::new(RegistryCatalog::default());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let catalog = Arc::clone(&catalog);
                std::thread::spawn(move || catalog.registry::<Gadget>().unwrap())
            })
            .collect();
        let registries: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(GADGET_DEFINITIONS.load(Ordering::SeqCst), 1);
        assert!(registries.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert_eq!(catalog.record_types(), vec!["gadget".to_string()]);
    }

    #[test]
    fn test_broken_definition_is_error_and_not_cached() {
        let catalog = RegistryCatalog::default();
        assert!(catalog.define::<Broken>().is_err());
        assert!(!catalog.is_defined::<Broken>());
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_catalog_pipeline() {
        let catalog = RegistryCatalog::default();
        let pipeline = catalog.pipeline::<Widget>().unwrap();

        let draft = pipeline.get().permit(
            DraftRecord::blank(),
            &Payload::new().with("name", "long"),
            &["name"],
        );
        assert!(!draft.is_valid());
    }

    #[test]
    #[should_panic(expected = "Unknown validator 'uniqueness'")]
    fn test_record_type_facade_panics_on_broken_definition() {
        Broken::permit(DraftRecord::blank(), &Payload::new(), &["name"]);
    }
}
