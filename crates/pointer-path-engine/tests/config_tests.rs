#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use pointer_path_core::logging_facility::{active_profile, Profile};
use pointer_path_core::operation::{BuildSpec, CopySpec};
use pointer_path_core::EngineConfig;
use pointer_path_engine::json::{JsonBuilder, JsonCopier};
use serde_json::json;

// Logging can be initialized once per process, so the whole sequence is one test
#[test]
fn test_from_config_initializes_configured_log_profile() {
    assert_eq!(active_profile(), None);

    let config = EngineConfig::from_toml_str("log_profile = \"test\"").unwrap();
    let spec = CopySpec::builder().from("/person").build().unwrap();
    let copier = JsonCopier::from_config(&config, vec![spec]).unwrap();
    assert_eq!(active_profile(), Some(Profile::Test));

    let mut into = json!({});
    copier.copy(&common::nested(), &mut into).unwrap();
    assert_eq!(into["name"], json!("John Doe"));

    // a later engine does not replace the installed profile
    let config = EngineConfig::from_toml_str("log_profile = \"production\"").unwrap();
    let spec = BuildSpec::new().put_value("human", "/kind");
    let builder = JsonBuilder::from_config(&config, vec![spec]).unwrap();
    assert_eq!(active_profile(), Some(Profile::Test));

    let mut built = json!({});
    builder.build_literals(&mut built).unwrap();
    assert_eq!(built, json!({"kind": "human"}));
}
