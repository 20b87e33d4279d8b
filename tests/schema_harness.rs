use mip_mcp_server::handlers::tools;
use mip_mcp_server::memory::PromptLocale;
use mip_mcp_server::schema::{validate_json, validate_value, SchemaValidationError};
use serde_json::json;

#[test]
fn json_schema_harness_validates_instance() {
    let schema = r#"{
      "$schema": "https://json-schema.org/draft/2020-12/schema",
      "type": "object",
      "required": ["error"],
      "additionalProperties": false,
      "properties": {
        "error": {
          "type": "object",
          "required": ["code", "message"],
          "additionalProperties": false,
          "properties": {
            "code": { "type": "string" },
            "message": { "type": "string", "minLength": 1 }
          }
        }
      }
    }"#;

    let instance = r#"{
      "error": {
        "code": "memory_invalid",
        "message": "Memory file is not a valid memory document"
      }
    }"#;

    validate_json(schema, instance).expect("schema validation failed");
}

#[test]
fn update_schema_accepts_the_value_union() {
    let schema = tools::input_schema(tools::UPDATE_PREFERENCE, PromptLocale::En).unwrap();

    for value in [json!("blue"), json!(3), json!(2.5), json!(false), json!(["a", "b"]), json!([])] {
        let args = json!({ "section": "custom", "key": "k", "value": value.clone() });
        validate_value(&schema, &args).unwrap_or_else(|e| panic!("{value} rejected: {e}"));
    }
}

#[test]
fn update_schema_rejects_other_shapes() {
    let schema = tools::input_schema(tools::UPDATE_PREFERENCE, PromptLocale::En).unwrap();

    for value in [json!(null), json!({ "a": 1 }), json!([1, 2])] {
        let args = json!({ "section": "custom", "key": "k", "value": value.clone() });
        assert!(
            matches!(
                validate_value(&schema, &args),
                Err(SchemaValidationError::ValidationFailed(_))
            ),
            "{value} should be rejected"
        );
    }
}

#[test]
fn section_enum_is_closed() {
    let schema = tools::input_schema(tools::GET_PREFERENCE, PromptLocale::En).unwrap();

    for section in ["identity", "preferences", "custom"] {
        assert!(validate_value(&schema, &json!({ "section": section, "key": "k" })).is_ok());
    }
    assert!(validate_value(&schema, &json!({ "section": "Identity", "key": "k" })).is_err());
    assert!(validate_value(&schema, &json!({ "section": "version", "key": "k" })).is_err());
}

#[test]
fn every_advertised_tool_has_a_compilable_schema() {
    for def in tools::definitions(PromptLocale::Zh) {
        let schema = &def["inputSchema"];
        let name = def["name"].as_str().unwrap();
        assert!(
            jsonschema::validator_for(schema).is_ok(),
            "schema for {name} must compile"
        );
    }
}
