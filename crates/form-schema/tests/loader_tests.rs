//! Tests for loading schemas in every supported format

use form_schema::{FieldKind, PrimitiveType, RemovalPolicy, SchemaLoader, default_of};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn write(temp: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = temp.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_json_schema() {
    let temp = TempDir::new().unwrap();
    let path = write(
        &temp,
        "schema.json",
        r#"{
            "title": "Basics",
            "sections": [{"controls": [
                {"type": "int", "id": "tempo", "default": 80},
                {"type": "checkbox", "id": "arpeggiate"}
            ]}]
        }"#,
    );

    let schema = SchemaLoader::new().load(&path).unwrap();
    assert_eq!(schema.title(), Some("Basics"));
    assert_eq!(
        default_of(schema.root()),
        json!({"tempo": 80, "arpeggiate": false})
    );
}

#[test]
fn test_load_toml_schema() {
    let temp = TempDir::new().unwrap();
    let path = write(
        &temp,
        "schema.toml",
        r#"
title = "Minimal"

[[sections]]
title = "Basics"

[[sections.controls]]
type = "int"
id = "tempo"
default = 80

[[sections.controls]]
type = "fixedList"
id = "weights"
labels = ["do", "re"]
default = [1, 2]

[sections.controls.itemType]
type = "int"
"#,
    );

    let schema = SchemaLoader::new().load(&path).unwrap();
    assert_eq!(
        default_of(schema.root()),
        json!({"tempo": 80, "weights": [1, 2]})
    );
}

#[test]
fn test_load_yaml_schema() {
    let temp = TempDir::new().unwrap();
    let path = write(
        &temp,
        "schema.yaml",
        r#"
sections:
  - title: Intervals
    controls:
      - type: dynamicList
        id: intervalWeights
        itemType:
          type: number
        default: [10, 20, 20]
        minLength: 1
        removeType: onlyLast
"#,
    );

    let schema = SchemaLoader::new().load(&path).unwrap();
    let field = schema.field("intervalWeights").unwrap();
    let FieldKind::DynamicCollection(list) = &field.kind else {
        panic!("expected dynamic collection");
    };
    assert_eq!(list.min_length, 1);
    assert_eq!(list.removal_policy, RemovalPolicy::OnlyLast);
    assert!(matches!(
        &list.item.kind,
        FieldKind::Primitive(p) if p.ty == PrimitiveType::Float
    ));
}

#[test]
fn test_malformed_json_reports_format() {
    let temp = TempDir::new().unwrap();
    let path = write(&temp, "broken.json", "{ not json");
    let err = SchemaLoader::new().load(&path).unwrap_err();
    assert!(err.to_string().contains("JSON"));
}

#[test]
fn test_duplicate_ids_fail_validation() {
    let temp = TempDir::new().unwrap();
    let path = write(
        &temp,
        "dup.json",
        r#"{"sections": [
            {"controls": [{"type": "int", "id": "tempo"}]},
            {"controls": [{"type": "float", "id": "tempo"}]}
        ]}"#,
    );
    let err = SchemaLoader::new().load(&path).unwrap_err();
    assert!(err.to_string().contains("tempo"));
}

#[rstest]
#[case::unknown_extension("schema.ini", "{}", "Unsupported")]
#[case::fixed_list_without_labels(
    "empty.json",
    r#"{"sections": [{"controls": [{"type": "fixedList", "id": "w", "itemType": {"type": "int"}}]}]}"#,
    "no labels"
)]
#[case::enum_default_not_an_option(
    "radio.json",
    r#"{"sections": [{"controls": [{"type": "radio", "id": "dir", "options": [{"value": "up"}], "default": "down"}]}]}"#,
    "not one of its options"
)]
#[case::selector_without_source(
    "selector.json",
    r#"{"sections": [{"controls": [
        {"type": "preset-selector", "targetField": "tempo", "presetSource": "tempoPresets"},
        {"type": "int", "id": "tempo"}
    ]}]}"#,
    "tempoPresets"
)]
fn test_rejected_schemas(#[case] name: &str, #[case] content: &str, #[case] expected: &str) {
    let temp = TempDir::new().unwrap();
    let path = write(&temp, name, content);
    let err = SchemaLoader::new().load(&path).unwrap_err();
    assert!(
        err.to_string().contains(expected),
        "unexpected error: {err}"
    );
}
