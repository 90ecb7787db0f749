#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use pointer_path_core::json::{
    boolean_filter, string_filter, string_value_filter, PrimitiveTransform, SetTextTransform,
};
use pointer_path_core::operation::{Arguments, CopySpec};
use pointer_path_core::types::Scalar;
use pointer_path_core::{EngineConfig, PointerError};
use pointer_path_engine::json::JsonCopier;
use serde_json::{json, Value};

fn run(spec: CopySpec<Value>, from: &Value, into: Value) -> Value {
    let copier = JsonCopier::new(vec![spec]).unwrap();
    let mut into = into;
    copier.copy(from, &mut into).unwrap();
    into
}

// ===== From =====

#[test]
fn test_copy() {
    let spec = CopySpec::builder().from("/person").build().unwrap();
    let result = run(spec, &common::nested(), json!({}));

    assert_eq!(result["name"], json!("John Doe"));
    assert_eq!(result["age"], json!(50));
    assert_eq!(result["ssn"], json!("123-45-6789"));
}

#[test]
fn test_copy_predicate() {
    let spec = CopySpec::builder()
        .from_filtered("/person", string_filter("/name", "John Doe").unwrap())
        .build()
        .unwrap();
    let result = run(spec, &common::nested(), json!({}));

    assert_eq!(result["name"], json!("John Doe"));
    assert_eq!(result["age"], json!(50));
    assert_eq!(result["ssn"], json!("123-45-6789"));
}

#[test]
fn test_copy_predicate_negate() {
    let spec = CopySpec::builder()
        .from_filtered("/person", string_filter("/name", "John Doe").unwrap().negate())
        .build()
        .unwrap();
    let result = run(spec, &common::nested(), json!({}));

    assert_eq!(result, json!({}));
}

#[test]
fn test_copy_predicate_boolean() {
    let spec = CopySpec::builder()
        .from_filtered("/person", boolean_filter("/human", true).unwrap())
        .build()
        .unwrap();
    let result = run(spec, &common::nested(), common::simple());

    // data lands in the existing object
    assert_eq!(result["existing"], json!("value"));
    assert_eq!(result["name"], json!("John Doe"));
    assert_eq!(result["human"], json!(true));
    assert_eq!(result["age"], json!(50));
}

#[test]
fn test_copy_predicate_boolean_negate() {
    let spec = CopySpec::builder()
        .from_filtered("/person", boolean_filter("/human", true).unwrap().negate())
        .build()
        .unwrap();
    let result = run(spec, &common::nested(), common::simple());

    assert_eq!(result, common::simple());
}

#[test]
fn test_copy_as_array_predicate() {
    let spec = CopySpec::builder()
        .from_filtered("/people/*", string_filter("/person/name", "John Doe").unwrap())
        .build()
        .unwrap();
    let result = run(spec, &common::people(), json!({}));

    assert_eq!(result["person"]["name"], json!("John Doe"));
    assert_eq!(result["person"]["age"], json!(50));
}

#[test]
fn test_copy_as_array_predicate_negate() {
    let spec = CopySpec::builder()
        .from_filtered(
            "/people/*",
            string_filter("/person/name", "John Doe").unwrap().negate(),
        )
        .build()
        .unwrap();
    let result = run(spec, &common::people(), json!({}));

    assert_eq!(result["person"]["name"], json!("Jane Doe"));
    assert_eq!(result["person"]["age"], json!(49));
}

#[test]
fn test_copy_into() {
    let spec = CopySpec::builder()
        .with_target("/people")
        .from("/people/0")
        .build()
        .unwrap();
    let result = run(spec, &common::people(), json!({}));

    let person = &result["people"]["person"];
    assert_eq!(person["name"], json!("John Doe"));
    assert_eq!(person["age"], json!(50));
    assert_eq!(person["ssn"], json!("123-45-6789"));
}

#[test]
fn test_second_filter_on_same_source_is_rejected() {
    let err = CopySpec::<Value>::builder()
        .from_filtered("/person", boolean_filter("/human", true).unwrap())
        .from_filtered("/person", string_filter("/name", "John Doe").unwrap())
        .build()
        .unwrap_err();
    assert!(matches!(err, PointerError::InvalidOperation { .. }));
}

// ===== Include =====

#[test]
fn test_copy_include_from() {
    let spec = CopySpec::builder()
        .from_include("/person", &["/firstName"])
        .from_include("/person", &["/age"])
        .build()
        .unwrap();
    let result = run(spec, &common::nested(), json!({}));

    assert_eq!(result, json!({"firstName": "John", "age": 50}));
}

#[test]
fn test_copy_include_from_predicate() {
    let spec = CopySpec::builder()
        .from_include_filtered("/person", "/firstName", string_value_filter("John").negate())
        .from_include("/person", &["/age"])
        .build()
        .unwrap();
    let result = run(spec, &common::nested(), json!({}));

    assert_eq!(result, json!({"age": 50}));
}

#[test]
fn test_copy_include() {
    let spec = CopySpec::builder()
        .include(&["/person/firstName"])
        .include(&["/person/age"])
        .build()
        .unwrap();
    let result = run(spec, &common::nested(), json!({}));

    assert_eq!(result, json!({"person": {"firstName": "John", "age": 50}}));
}

#[test]
fn test_copy_include_wild() {
    let spec = CopySpec::builder()
        .include(&["/person/firstName"])
        .include(&["/*/age"])
        .build()
        .unwrap();
    let result = run(spec, &common::nested(), json!({}));

    assert_eq!(result, json!({"person": {"firstName": "John", "age": 50}}));
}

#[test]
fn test_copy_include_descent() {
    let spec = CopySpec::builder()
        .include(&["/person/firstName"])
        .include(&["/**/age"])
        .build()
        .unwrap();
    let result = run(spec, &common::nested(), json!({}));

    assert_eq!(result, json!({"person": {"firstName": "John", "age": 50}}));
}

#[test]
fn test_copy_include_from_many() {
    let spec = CopySpec::builder()
        .from_include("/person", &["/firstName", "/age"])
        .build()
        .unwrap();
    let result = run(spec, &common::nested(), json!({}));

    assert_eq!(result, json!({"firstName": "John", "age": 50}));
}

// ===== Exclude =====

#[test]
fn test_copy_exclude_from() {
    let spec = CopySpec::builder()
        .from_exclude("/person", &["/ssn", "/children"])
        .build()
        .unwrap();
    let result = run(spec, &common::nested(), json!({}));

    assert_eq!(result["name"], json!("John Doe"));
    assert_eq!(result["age"], json!(50));
    assert!(result.get("ssn").is_none());
    assert!(result.get("children").is_none());
}

#[test]
fn test_copy_exclude_from_whole_result() {
    let from = json!({
        "person": {"name": "John Doe", "age": 50, "measure": {"value": 100}}
    });
    let spec = CopySpec::builder()
        .from_exclude("/person", &["/age"])
        .build()
        .unwrap();
    let result = run(spec, &from, json!({}));

    assert_eq!(result, json!({"name": "John Doe", "measure": {"value": 100}}));
}

#[test]
fn test_copy_include_filtered_wildcard_stays_compact() {
    let from = json!({"list": [{"a": 1, "b": 2}, {"a": 3, "b": 4}]});
    let over_two = |v: &Value| v.as_i64().is_some_and(|n| n > 2);
    let spec = CopySpec::builder()
        .include_filtered("/list/*/*", over_two)
        .build()
        .unwrap();
    let result = run(spec, &from, json!({}));

    assert_eq!(result, json!({"list": [{"a": 3, "b": 4}]}));
}

#[test]
fn test_copy_exclude() {
    let spec = CopySpec::builder()
        .exclude(&["/person/ssn", "/person/children"])
        .build()
        .unwrap();
    let result = run(spec, &common::nested(), json!({}));

    assert_eq!(result["person"]["name"], json!("John Doe"));
    assert_eq!(result["person"]["age"], json!(50));
    assert!(result["person"].get("ssn").is_none());
    assert!(result["person"].get("children").is_none());
}

#[test]
fn test_copy_exclude_descent() {
    let spec = CopySpec::builder().exclude(&["/**/value"]).build().unwrap();
    let result = run(spec, &common::nested(), json!({}));

    assert_eq!(result["person"]["measure"], json!({}));
    assert_eq!(result["person"]["measures"], json!([{}, {}]));
    assert_eq!(result["person"]["measured"], json!([1000, 2000]));
}

// ===== Transform =====

#[test]
fn test_coerce() {
    let spec = CopySpec::builder()
        .from_transform("/person/measure", "/value", PrimitiveTransform::ToFloat)
        .build()
        .unwrap();
    let result = run(spec, &common::nested(), json!({}));

    assert!(result["value"].is_f64());
    assert_eq!(result["value"].as_f64(), Some(100.0));
}

#[test]
fn test_coerce_zero() {
    let spec = CopySpec::builder()
        .from_transform("/person/zero", "/zeroValue", PrimitiveTransform::ToFloat)
        .build()
        .unwrap();
    let result = run(spec, &common::nested(), json!({}));

    assert!(result["zeroValue"].is_f64());
    assert_eq!(result["zeroValue"].to_string(), "0.0");
}

#[test]
fn test_coerce_array() {
    let spec = CopySpec::builder()
        .from_transform("/person", "/measures/*/value", PrimitiveTransform::ToFloat)
        .build()
        .unwrap();
    let result = run(spec, &common::nested(), json!({}));

    assert!(result["measures"].is_array());
    assert_eq!(result["measures"][0]["value"].to_string(), "1000.0");
    assert_eq!(result["measures"][1]["value"].to_string(), "2000.0");
}

#[test]
fn test_resettable_transform() {
    let spec = CopySpec::builder()
        .from_transform(
            "/person",
            "/name",
            SetTextTransform::named("set-text", Some("value1")).unwrap(),
        )
        .build()
        .unwrap();
    assert!(spec.has_resettable_transforms());

    let from = common::nested();
    let mut copier = JsonCopier::new(vec![spec]).unwrap();
    let mut result = json!({});

    let mut arguments = Arguments::new();
    arguments.insert("set-text".to_string(), Scalar::from("value2"));
    copier.copy_with(&arguments, &from, &mut result).unwrap();
    assert_eq!(result["name"], json!("value2"));

    arguments.insert("set-text".to_string(), Scalar::from("value3"));
    copier.copy_with(&arguments, &from, &mut result).unwrap();
    assert_eq!(result["name"], json!("value3"));
}

#[test]
fn test_resettable_transform_falls_back_to_default() {
    let spec = CopySpec::builder()
        .from_transform(
            "/person",
            "/name",
            SetTextTransform::named("set-text", Some("value1")).unwrap(),
        )
        .build()
        .unwrap();

    let mut copier = JsonCopier::new(vec![spec]).unwrap();
    let mut result = json!({});
    copier
        .copy_with(&Arguments::new(), &common::nested(), &mut result)
        .unwrap();
    assert_eq!(result["name"], json!("value1"));
}

#[test]
fn test_transform_failure_aborts_copy() {
    let spec = CopySpec::builder()
        .from_transform("/person", "/name", PrimitiveTransform::ToInt)
        .build()
        .unwrap();
    let copier = JsonCopier::new(vec![spec]).unwrap();

    let mut result = json!({});
    let err = copier.copy(&common::nested(), &mut result).unwrap_err();
    assert!(matches!(err, PointerError::UnsupportedCoercion { .. }));
}

// ===== Specs and configuration =====

#[test]
fn test_specs_run_in_declaration_order() {
    let first = CopySpec::builder()
        .with_target("/out")
        .from_include("/person", &["/name"])
        .build()
        .unwrap();
    let second = CopySpec::builder()
        .with_target("/out")
        .from_transform("/person", "/name", SetTextTransform::new("replaced"))
        .from_include("/person", &["/name"])
        .build()
        .unwrap();
    let copier = JsonCopier::new(vec![first, second]).unwrap();
    assert_eq!(copier.spec_count(), 2);

    let mut result = json!({});
    copier.copy(&common::nested(), &mut result).unwrap();
    assert_eq!(result, json!({"out": {"name": "replaced"}}));
}

#[test]
fn test_copier_from_config() {
    let config = EngineConfig::from_toml_str(
        "cache_capacity = 4\ndescent_fast_path = false\nlog_profile = \"test\"",
    )
    .unwrap();
    let spec = CopySpec::builder().include(&["/person/**"]).build().unwrap();
    let copier = JsonCopier::from_config(&config, vec![spec]).unwrap();

    let mut result = json!({});
    copier.copy(&common::nested(), &mut result).unwrap();
    assert_eq!(result, json!({"person": common::nested()["person"]}));
}

#[test]
fn test_malformed_spec_names_spec() {
    let spec = CopySpec::<Value>::builder()
        .from_include("/person", &["/first*"])
        .build()
        .unwrap();
    let err = JsonCopier::new(vec![spec]).err().unwrap();

    match err {
        PointerError::SpecValidation { spec, source } => {
            assert!(spec.starts_with("CopySpec{"));
            assert!(matches!(*source, PointerError::MalformedPath { .. }));
        }
        other => panic!("expected SpecValidation, got {:?}", other),
    }
}
