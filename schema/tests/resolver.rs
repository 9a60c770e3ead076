//! End to end resolution of field sets into serialization trees

#![allow(clippy::unwrap_used, reason = "tests")]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use propbox_schema::classify::{TypeBindings, TypeClassifier};
use propbox_schema::factory::{FieldSchemaBuilder, NestedResolver, SchemaFieldFactory};
use propbox_schema::model::{
    DeclaredType, FieldDefinition, FieldSet, FieldSetLink, NumericRange, ValidationRule,
};
use propbox_schema::resolve::{ResolverConfig, SerializationTreeResolver};
use propbox_schema::tree::{ElementSchema, NestedSchema, SchemaField, SchemaPrimitiveKind};

/// Wraps the default factory and counts per-field work
#[derive(Debug, Default)]
struct CountingBuilder {
    inner: SchemaFieldFactory,
    calls: AtomicUsize,
}

impl CountingBuilder {
    fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }
}

impl FieldSchemaBuilder for CountingBuilder {
    fn build(
        &self,
        field: &FieldDefinition,
        nested: &mut dyn NestedResolver,
    ) -> Option<SchemaField> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.build(field, nested)
    }
}

fn parse(expression: &str) -> DeclaredType { DeclaredType::parse(expression).unwrap() }

fn person_fields() -> Vec<FieldDefinition> {
    vec![
        FieldDefinition::new("name", DeclaredType::string()).required(),
        FieldDefinition::new("age", parse("i32")).with_rule(ValidationRule::NumericRange(
            NumericRange::between(0.0, 150.0).exclusive_max(),
        )),
    ]
}

#[test]
fn resolves_fields_in_order_with_constraints() {
    let person = FieldSet::named("Person", person_fields()).unwrap();
    let tree = SerializationTreeResolver::default().resolve(&person);

    assert_eq!(tree.name(), Some("Person"));
    let names: Vec<&str> = tree.fields().iter().map(|field| field.name.as_str()).collect();
    assert_eq!(names, vec!["name", "age"]);

    let name = &tree.fields()[0];
    assert_eq!(name.kind, SchemaPrimitiveKind::String);
    assert!(name.constraints.required);

    let age = &tree.fields()[1];
    assert_eq!(age.kind, SchemaPrimitiveKind::Integer);
    assert_eq!(age.constraints.maximum, Some(150.0));
    assert!(age.constraints.exclusive_maximum);
    assert!(!age.constraints.required);

    assert_eq!(tree.required_fields().collect::<Vec<_>>(), vec!["name"]);
}

#[test]
fn identical_sets_are_independent_entries() {
    let first = FieldSet::named("Person", person_fields()).unwrap();
    let second = FieldSet::named("Person", person_fields()).unwrap();
    let resolver = SerializationTreeResolver::default();

    let first_tree = resolver.resolve(&first);
    let second_tree = resolver.resolve(&second);

    assert_eq!(resolver.cache().len(), 2);
    assert!(!Arc::ptr_eq(&first_tree, &second_tree));
    assert_eq!(*first_tree, *second_tree);
}

#[test]
fn second_resolve_does_no_field_work() {
    let person = FieldSet::named("Person", person_fields()).unwrap();
    let resolver = SerializationTreeResolver::new(CountingBuilder::default());

    let first = resolver.resolve(&person);
    assert_eq!(resolver.builder().calls(), 2);

    let second = resolver.resolve(&person);
    assert_eq!(resolver.builder().calls(), 2);
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn truncated_root_is_resolved_once() {
    let mut chain = FieldSet::named("L0", [FieldDefinition::new("id", parse("i64"))]).unwrap();
    for level in 1..=3 {
        chain = FieldSet::named(
            format!("L{level}"),
            [FieldDefinition::new("next", parse("PropertyBox")).with_nested(&chain)],
        )
        .unwrap();
    }
    let config = ResolverConfig {
        max_depth: 2,
        ..ResolverConfig::default()
    };
    let resolver = SerializationTreeResolver::with_config(CountingBuilder::default(), config);

    let first = resolver.resolve(&chain);
    assert_eq!(resolver.builder().calls(), 2);
    let l2 = first.fields()[0].nested.as_ref().unwrap().tree().unwrap();
    assert_eq!(l2.fields()[0].nested, Some(NestedSchema::Truncated));

    let second = resolver.resolve(&chain);
    assert_eq!(resolver.builder().calls(), 2);
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn nested_records_are_expanded_and_cached() {
    let address = FieldSet::named(
        "Address",
        [
            FieldDefinition::new("street", DeclaredType::string()),
            FieldDefinition::new("zip", DeclaredType::string())
                .with_rule(ValidationRule::pattern("^[0-9]{5}$")),
        ],
    )
    .unwrap();
    let customer = FieldSet::named(
        "Customer",
        [
            FieldDefinition::new("id", parse("Uuid")).read_only(),
            FieldDefinition::new("billing", parse("Option<PropertyBox>")).with_nested(&address),
            FieldDefinition::new("shipping", parse("Vec<PropertyBox>")).with_nested(&address),
        ],
    )
    .unwrap();

    let resolver = SerializationTreeResolver::new(CountingBuilder::default());
    let tree = resolver.resolve(&customer);
    // address fields are built once and reused from the cache
    assert_eq!(resolver.builder().calls(), 3 + 2);

    let billing = tree.field("billing").unwrap();
    assert_eq!(billing.kind, SchemaPrimitiveKind::Object);
    let billing_tree = billing.nested.as_ref().unwrap().tree().unwrap();
    assert_eq!(
        billing_tree.field("zip").unwrap().constraints.pattern.as_deref(),
        Some("^[0-9]{5}$")
    );

    let shipping = tree.field("shipping").unwrap();
    assert_eq!(shipping.kind, SchemaPrimitiveKind::Array);
    assert!(matches!(shipping.element, Some(ElementSchema::Record(_))));
    let shipping_tree = shipping.record_schema().and_then(NestedSchema::tree).unwrap();
    assert!(Arc::ptr_eq(billing_tree, shipping_tree));
    assert!(resolver.cache().get(&address).is_some());
}

#[test]
fn mutually_recursive_sets_resolve_to_finite_trees() {
    let employee_link = FieldSetLink::new();
    let department = FieldSet::named(
        "Department",
        [
            FieldDefinition::new("title", DeclaredType::string()),
            FieldDefinition::new("staff", parse("Vec<PropertyBox>"))
                .with_nested(employee_link.clone()),
        ],
    )
    .unwrap();
    let employee = FieldSet::named(
        "Employee",
        [
            FieldDefinition::new("name", DeclaredType::string()),
            FieldDefinition::new("department", parse("PropertyBox")).with_nested(&department),
        ],
    )
    .unwrap();
    employee_link.bind(&employee).unwrap();

    let resolver = SerializationTreeResolver::default();
    let tree = resolver.resolve(&employee);

    let department_tree = tree
        .field("department")
        .unwrap()
        .nested
        .as_ref()
        .unwrap()
        .tree()
        .unwrap();
    assert_eq!(
        department_tree.field("staff").unwrap().record_schema(),
        Some(&NestedSchema::Recursive {
            name: Some("Employee".to_string()),
        })
    );

    // the department subtree points back at its entry point and is not cached on its own
    assert!(resolver.cache().get(&employee).is_some());
    assert!(resolver.cache().get(&department).is_none());

    let from_department = resolver.resolve(&department);
    let staff = from_department.field("staff").unwrap().record_schema().unwrap();
    assert!(staff.tree().is_some());
}

#[test]
fn dropped_sets_are_swept_from_the_cache() {
    let config = ResolverConfig {
        sweep_interval: 4,
        ..ResolverConfig::default()
    };
    let resolver = SerializationTreeResolver::with_config(SchemaFieldFactory::default(), config);

    for _ in 0..3 {
        let transient = FieldSet::new(person_fields()).unwrap();
        resolver.resolve(&transient);
    }
    assert_eq!(resolver.cache().len(), 3);

    let kept = FieldSet::new(person_fields()).unwrap();
    resolver.resolve(&kept);
    assert_eq!(resolver.cache().len(), 1);
    assert!(resolver.cache().get(&kept).is_some());
}

#[test]
fn concurrent_resolves_observe_complete_trees() {
    let address = FieldSet::named(
        "Address",
        [FieldDefinition::new("street", DeclaredType::string())],
    )
    .unwrap();
    let person = FieldSet::named(
        "Person",
        person_fields()
            .into_iter()
            .chain([FieldDefinition::new("home", parse("PropertyBox")).with_nested(&address)]),
    )
    .unwrap();
    let resolver = SerializationTreeResolver::default();
    let expected = SerializationTreeResolver::default().resolve(&person);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| resolver.resolve(&person)))
            .collect();
        for handle in handles {
            let tree = handle.join().unwrap();
            assert_eq!(*tree, *expected);
            assert_eq!(tree.fields().len(), 3);
        }
    });
}

#[test]
fn generic_aware_resolution_binds_variables() {
    let address = FieldSet::named(
        "Address",
        [FieldDefinition::new("street", DeclaredType::string())],
    )
    .unwrap();
    let bindings = TypeBindings::new().bind_variable("T", DeclaredType::record());
    let field = FieldDefinition::new("addresses", parse("Vec<T>")).with_nested(&address);
    let set = FieldSet::new([field]).unwrap();

    let generic = SerializationTreeResolver::new(SchemaFieldFactory::new(TypeClassifier::probe(
        Some(Arc::new(bindings)),
    )));
    let tree = generic.resolve(&set);
    assert_eq!(tree.fields()[0].kind, SchemaPrimitiveKind::Array);
    assert!(tree.fields()[0].record_schema().is_some());

    // the raw strategy cannot see what T is bound to and skips the field
    let raw = SerializationTreeResolver::default().resolve(&set);
    assert!(raw.fields().is_empty());
}
