use fieldgate::prelude::*;
use proptest::prelude::*;
use std::collections::BTreeMap;

struct User;

impl RecordType for User {
    const NAME: &'static str = "user";

    fn define(schema: &mut RegistryBuilder) {
        schema.validates_with(
            "name",
            "length",
            ValidatorArgs::new().with("min", 1i64).with("max", 20i64),
        );
    }
}

struct Product;

impl RecordType for Product {
    const NAME: &'static str = "product";

    fn define(schema: &mut RegistryBuilder) {
        schema
            .validates_with("sku", "format", ValidatorArgs::new().with("prefix", "SKU-"))
            .validates_with(
                "sku",
                "length",
                ValidatorArgs::new().with("is", 8i64),
            )
            .validates_with(
                "stock",
                "number",
                ValidatorArgs::new().with("greater_than_or_equal_to", 0i64),
            );
    }
}

#[test]
fn short_name_is_accepted() {
    let payload = Payload::new().with("name", "Al");
    let draft = User::permit(DraftRecord::blank(), &payload, &["name"]);

    assert!(draft.errors().is_empty());
    assert_eq!(draft.changes().len(), 1);
    assert_eq!(draft.change("name"), Some(&Value::from("Al")));
}

#[test]
fn empty_name_fails_presence_and_length() {
    let payload = Payload::new().with("name", "");
    let draft = User::permit(DraftRecord::blank(), &payload, &["name"]);

    let errors = draft.errors_on("name");
    assert!(errors.iter().any(ErrorMessage::is_required));
    assert!(errors.iter().any(|e| e.kind == ErrorKind::Length));
    assert_eq!(draft.change("name"), Some(&Value::from("")));
}

#[test]
fn unpermitted_keys_never_reach_the_draft() {
    let payload = Payload::new().with("name", "X").with("admin", true);
    let draft = User::permit(DraftRecord::blank(), &payload, &["name"]);

    assert_eq!(draft.changes().len(), 1);
    assert!(draft.change("admin").is_none());
    assert!(!draft.has_errors_on("admin"));

    let json = serde_json::to_string(&draft).unwrap();
    assert!(!json.contains("admin"));
}

#[test]
fn field_without_rules_is_a_no_op() {
    let draft = DraftRecord::blank().with_error("name", ErrorMessage::new(ErrorKind::Custom, "taken"));
    let before = draft.clone();

    let after = User::validate_fields(draft, &["price"]);
    assert_eq!(after, before);
}

#[test]
fn rules_on_one_field_run_in_declaration_order() {
    let registry = Product::registry();
    let ids: Vec<_> = registry
        .rules_for("sku")
        .into_iter()
        .flat_map(|rule| rule.validator_ids())
        .map(|id| id.as_str().to_string())
        .collect();
    assert_eq!(ids, vec!["format", "length"]);

    let draft = Product::permit(DraftRecord::blank(), &Payload::new().with("sku", "X"), &["sku"]);
    let kinds: Vec<_> = draft.errors_on("sku").iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![ErrorKind::Format, ErrorKind::Length]);
}

#[test]
fn update_against_existing_record() {
    let base = Record::new().with("sku", "SKU-0001").with("stock", 4i64);
    let payload = Payload::new().with("stock", -1i64);

    let draft = Product::permit_with(DraftRecord::new(base), &payload, &["sku"], &["stock"]);
    assert!(!draft.has_errors_on("sku"));
    assert_eq!(draft.errors_on("stock")[0].kind, ErrorKind::Number);

    let err = draft.apply().unwrap_err();
    assert_eq!(err.fields, vec![FieldName::from("stock")]);
}

#[test]
fn valid_draft_applies_over_base() {
    let base = Record::new().with("sku", "SKU-0001").with("stock", 4i64);
    let payload = Payload::new().with("stock", 10i64).with("price", 3i64);

    let draft = Product::cast_only(DraftRecord::new(base), &payload, &["stock"]);
    let record = draft.apply().unwrap();

    assert_eq!(record.get("stock"), Some(&Value::from(10i64)));
    assert_eq!(record.get("sku"), Some(&Value::from("SKU-0001")));
    assert!(!record.contains("price"));
}

#[test]
fn halt_policy_stops_after_first_failure() {
    let registry = Product::registry();
    let config = EngineConfig::default().with_rule_policy(RulePolicy::HaltFieldOnError);
    let pipeline = Pipeline::new(&registry, &config);

    let draft = pipeline.permit(DraftRecord::blank(), &Payload::new().with("sku", "X"), &["sku"]);
    assert_eq!(draft.errors_on("sku").len(), 1);
    assert_eq!(draft.errors_on("sku")[0].kind, ErrorKind::Format);
}

#[test]
fn config_file_drives_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fieldgate.toml");
    std::fs::write(&path, "required_message = \"is required\"\nempty_string_as_null = true\n").unwrap();

    let config = EngineConfig::from_path(&path).unwrap();
    let registry = User::registry();
    let draft = Pipeline::new(&registry, &config).permit(
        DraftRecord::blank(),
        &Payload::new().with("name", ""),
        &["name"],
    );

    assert_eq!(draft.change("name"), Some(&Value::Null));
    assert_eq!(draft.full_messages(), vec!["name is required".to_string()]);
}

fn payload_from(entries: &BTreeMap<String, i64>) -> Payload {
    entries.iter().map(|(k, v)| (k.clone(), *v)).collect()
}

proptest! {
    #[test]
    fn changes_stay_within_allow_list(
        entries in prop::collection::btree_map("[a-f]", any::<i64>(), 0..6),
        allowed in prop::collection::vec("[a-f]", 0..6),
    ) {
        let payload = payload_from(&entries);
        let draft = User::cast_only(DraftRecord::blank(), &payload, &allowed);

        for (field, value) in draft.changes() {
            prop_assert!(allowed.iter().any(|a| a == field.as_str()));
            prop_assert_eq!(Some(value), payload.get(field.as_str()));
        }
        for key in allowed.iter().filter(|k| entries.contains_key(*k)) {
            prop_assert!(draft.change(key).is_some());
        }
    }

    #[test]
    fn missing_required_fields_are_flagged(
        entries in prop::collection::btree_map("[a-f]", any::<i64>(), 0..6),
        required in prop::collection::vec("[a-f]", 0..6),
    ) {
        let payload = payload_from(&entries);
        let draft = User::permit(DraftRecord::blank(), &payload, &required);

        for field in &required {
            let flagged = draft.errors_on(field).iter().any(ErrorMessage::is_required);
            prop_assert_eq!(flagged, !entries.contains_key(field));
        }
    }

    #[test]
    fn undeclared_fields_never_gain_errors(
        fields in prop::collection::vec("[a-f]", 0..6),
    ) {
        let draft = Product::validate_fields(DraftRecord::blank(), &fields);
        prop_assert!(draft.is_valid());
    }
}
