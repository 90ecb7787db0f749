#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;

use pointer_path_core::operation::BuildSpec;
use pointer_path_core::types::{CoercionType, Scalar};
use pointer_path_core::PointerError;
use pointer_path_engine::json::JsonBuilder;
use serde_json::json;

fn arguments() -> HashMap<&'static str, Scalar> {
    HashMap::from([
        ("id", Scalar::from("123-45-6789")),
        ("age", Scalar::from(50)),
        ("first", Scalar::from("John")),
        ("last", Scalar::from("Doe")),
        ("child", Scalar::from("Jane")),
        ("child-age", Scalar::from(4)),
    ])
}

#[test]
fn test_build() {
    let args = arguments();
    let spec = BuildSpec::new()
        .put_into("id", "/ssn")
        .put_into_as("age", CoercionType::Text, "/age")
        .put_into("first", "/name/first")
        .put_into("last", "/name/last")
        .add_into("child", "/children")
        .add_into_as("child-age", CoercionType::Integer, "/childAges");
    let builder = JsonBuilder::new(vec![spec]).unwrap();

    let mut value = json!({});
    builder
        .build(|key: &str, _: &CoercionType| args.get(key).cloned(), &mut value)
        .unwrap();

    assert_eq!(value["name"]["first"], json!("John"));
    assert_eq!(value["name"]["last"], json!("Doe"));
    // the requested type is honored
    assert_eq!(value["age"], json!("50"));
    assert_eq!(value["ssn"], json!("123-45-6789"));
    assert_eq!(value["children"], json!(["Jane"]));
    assert_eq!(value["childAges"], json!([4]));
}

#[test]
fn test_build_into_target() {
    let args = arguments();
    let spec = BuildSpec::new()
        .with_target("/person")
        .put_into("first", "/name")
        .put_value(true, "/human");
    let builder = JsonBuilder::new(vec![spec]).unwrap();

    let mut value = json!({"existing": "value"});
    builder
        .build(|key: &str, _: &CoercionType| args.get(key).cloned(), &mut value)
        .unwrap();

    assert_eq!(
        value,
        json!({"existing": "value", "person": {"human": true, "name": "John"}})
    );
}

#[test]
fn test_build_add_appends_across_runs() {
    let args = arguments();
    let spec = BuildSpec::new().add_into("child", "/children");
    let builder = JsonBuilder::new(vec![spec]).unwrap();

    let mut value = json!({});
    for _ in 0..2 {
        builder
            .build(|key: &str, _: &CoercionType| args.get(key).cloned(), &mut value)
            .unwrap();
    }
    assert_eq!(value, json!({"children": ["Jane", "Jane"]}));
}

#[test]
fn test_build_default_type() {
    let spec = BuildSpec::new()
        .with_default_type(CoercionType::Float)
        .put_into("age", "/age");
    let builder = JsonBuilder::new(vec![spec]).unwrap();

    let mut value = json!({});
    builder
        .build(|_: &str, _: &CoercionType| Some(Scalar::from(50)), &mut value)
        .unwrap();
    assert_eq!(value["age"].as_f64(), Some(50.0));
}

#[test]
fn test_lookup_receives_requested_type() {
    let spec = BuildSpec::new()
        .put_into_as("flag", CoercionType::Boolean, "/flag")
        .put_into("name", "/name");
    let builder = JsonBuilder::new(vec![spec]).unwrap();

    let mut value = json!({});
    builder
        .build(
            |key: &str, as_type: &CoercionType| match (key, as_type) {
                ("flag", CoercionType::Boolean) => Some(Scalar::from("TRUE")),
                ("name", CoercionType::Native) => Some(Scalar::from("John")),
                _ => None,
            },
            &mut value,
        )
        .unwrap();
    assert_eq!(value, json!({"flag": true, "name": "John"}));
}

#[test]
fn test_build_through_value_fails() {
    let spec = BuildSpec::new().put_into("first", "/name/first");
    let builder = JsonBuilder::new(vec![spec]).unwrap();

    let mut value = json!({"name": "John Doe"});
    let err = builder
        .build(|_: &str, _: &CoercionType| Some(Scalar::from("John")), &mut value)
        .unwrap_err();
    assert!(matches!(err, PointerError::InvalidOperation { .. }));
}

#[test]
fn test_malformed_build_spec_names_spec() {
    let spec = BuildSpec::new().put_into("first", "/name/*");
    let err = JsonBuilder::new(vec![spec]).err().unwrap();

    match err {
        PointerError::SpecValidation { spec, .. } => assert!(spec.starts_with("BuildSpec{")),
        other => panic!("expected SpecValidation, got {:?}", other),
    }
}
