use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use beanmock_core::{Bean, TypeCatalog, TypeDef, Value, type_ids};
use beanmock_generate::{FixedClock, MockEngine, MockError, RandomSource, TypeValueRegistry};

fn catalog() -> Arc<TypeCatalog> {
    Arc::new(
        TypeCatalog::new(vec![
            TypeDef::new("Address")
                .property("street", type_ids::STRING)
                .property("number", type_ids::INTEGER),
            TypeDef::new("Person")
                .property("name", type_ids::STRING)
                .property("age", type_ids::INTEGER)
                .property("birthday", type_ids::DATE)
                .property("initial", type_ids::CHARACTER)
                .property("address", "Address"),
        ])
        .expect("valid catalog"),
    )
}

fn engine(seed: u64) -> MockEngine {
    let clock = FixedClock(Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap());
    let mut source = RandomSource::seeded(seed);
    let registry = TypeValueRegistry::new(&mut source, &clock);
    MockEngine::new(catalog())
        .with_registry(Arc::new(registry))
        .with_source(source)
        .with_clock(clock)
}

#[test]
fn fill_keeps_existing_values() {
    let mut engine = engine(1);
    let address = Bean::new("Address").with("street", Value::String("Main".to_string()));
    let person = Bean::new("Person")
        .with("name", Value::String("Ana".to_string()))
        .with("address", Value::Bean(Box::new(address.clone())));

    let filled = engine.try_fill(person, true).expect("fill");

    assert_eq!(filled.get("name").as_str(), Some("Ana"));
    assert_eq!(filled.get("address"), &Value::Bean(Box::new(address)));
    assert!(filled.get("age").as_i64().is_some());
    assert!(matches!(filled.get("birthday"), Value::Date(_)));
    assert!(matches!(filled.get("initial"), Value::Character(_)));
}

#[test]
fn fill_assigns_what_build_would() {
    let mut engine = engine(2);
    let built = engine.try_build("Person", true).expect("build");
    let filled = engine
        .try_fill(Bean::new("Person"), true)
        .expect("fill empty bean");

    let mut built_fields: Vec<&str> = built.fields().map(|(name, _)| name).collect();
    let mut filled_fields: Vec<&str> = filled.fields().map(|(name, _)| name).collect();
    built_fields.sort_unstable();
    filled_fields.sort_unstable();
    assert_eq!(built_fields, filled_fields);
    assert_eq!(filled.get("age"), built.get("age"));
}

#[test]
fn fill_without_recursion_leaves_nested_null() {
    let mut engine = engine(3);
    let filled = engine
        .fill_with(Bean::new("Person"), false)
        .expect("fill without recursion");
    assert!(filled.is_null("address"));
    assert!(filled.get("name").as_str().is_some());
}

#[test]
fn explicit_nulls_are_treated_as_empty() {
    let mut engine = engine(4);
    let person = Bean::new("Person").with("age", Value::Null);
    let filled = engine.fill(person).expect("fill");
    assert!(filled.get("age").as_i64().is_some());
}

#[test]
fn unknown_instance_type_is_reported() {
    let mut engine = engine(5);
    assert!(matches!(
        engine.try_fill(Bean::new("Ghost"), true),
        Err(MockError::UnknownType(_))
    ));
    assert!(engine.fill(Bean::new("Ghost")).is_none());
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Address {
    street: Option<String>,
    number: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Person {
    name: Option<String>,
    age: Option<i32>,
    birthday: Option<DateTime<Utc>>,
    initial: Option<char>,
    address: Option<Address>,
}

#[test]
fn build_as_decodes_into_caller_structs() {
    let mut engine = engine(6);
    let person: Person = engine.build_as("Person", true).expect("typed build");

    assert!(person.name.as_deref().unwrap().starts_with("name_"));
    assert!((1000..=100_000).contains(&person.age.unwrap()));
    assert_eq!(
        person.birthday,
        Some(Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap())
    );
    assert!(person.initial.is_some());
    let address = person.address.expect("nested address");
    assert!(address.street.unwrap().starts_with("street_"));
}

#[test]
fn fill_as_only_touches_empty_fields() {
    let mut engine = engine(7);
    let original = Person {
        name: Some("Bruno".to_string()),
        age: None,
        birthday: None,
        initial: Some('B'),
        address: Some(Address {
            street: None,
            number: Some(12),
        }),
    };

    let filled = engine.fill_as("Person", &original, false).expect("typed fill");

    assert_eq!(filled.name.as_deref(), Some("Bruno"));
    assert_eq!(filled.initial, Some('B'));
    assert!(filled.age.is_some());
    assert!(filled.birthday.is_some());
    let address = filled.address.expect("address kept");
    assert_eq!(address.number, Some(12));
    assert_eq!(address.street, None);
}

#[test]
fn fill_as_rejects_unknown_types() {
    let mut engine = engine(8);
    let original = Person {
        name: None,
        age: None,
        birthday: None,
        initial: None,
        address: None,
    };
    assert!(matches!(
        engine.fill_as("Ghost", &original, true),
        Err(MockError::UnknownType(_))
    ));
}
