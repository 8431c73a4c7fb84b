//! Schema inspection commands

use std::path::Path;

use colored::Colorize;
use form_schema::{FieldDescriptor, FieldKind, Schema};
use serde_json::{Map, Value, json};

use super::print_json;
use crate::context::CliContext;
use crate::error::Result;

/// Run the check command
pub fn run_check(ctx: &CliContext, schema_path: &Path) -> Result<()> {
    let schema = ctx.load_schema(schema_path)?;
    eprintln!(
        "{} {} ({} fields)",
        "valid".green().bold(),
        schema_path.display(),
        schema.fields().len()
    );
    print_json(&summarize(&schema))
}

/// Run the defaults command
pub fn run_defaults(ctx: &CliContext, schema_path: &Path) -> Result<()> {
    let engine = ctx.engine(schema_path)?;
    print_json(&engine.get_current_config())
}

/// Run the presets command
pub fn run_presets(ctx: &CliContext, schema_path: &Path, field: &str) -> Result<()> {
    let engine = ctx.engine(schema_path)?;
    let names = engine.preset_names(field);
    if names.is_empty() {
        eprintln!(
            "{} No presets for field '{}'",
            "warning:".yellow().bold(),
            field
        );
    }
    print_json(&json!(names))
}

fn summarize(schema: &Schema) -> Value {
    let fields: Vec<Value> = schema.fields().iter().map(|f| describe(f)).collect();
    let sections: Vec<Value> = schema
        .sections()
        .iter()
        .map(|s| json!({"title": s.title, "fields": s.field_ids}))
        .collect();
    let presets: Map<String, Value> = schema
        .presets()
        .iter()
        .map(|p| {
            let names: Vec<&String> = p.entries.keys().collect();
            (p.target_field.clone(), json!({"source": p.source, "names": names}))
        })
        .collect();

    json!({
        "title": schema.title(),
        "sections": sections,
        "fields": fields,
        "presets": presets,
    })
}

fn describe(field: &FieldDescriptor) -> Value {
    let mut out = json!({
        "id": field.id,
        "kind": field.kind_name(),
    });
    if let Some(label) = &field.label {
        out["label"] = json!(label);
    }
    match &field.kind {
        FieldKind::Primitive(_) => {}
        FieldKind::FixedCollection(f) => {
            out["labels"] = json!(f.labels);
            out["item"] = describe(&f.item);
        }
        FieldKind::DynamicCollection(c) => {
            out["minLength"] = json!(c.min_length);
            out["removeType"] = json!(c.removal_policy);
            out["item"] = describe(&c.item);
        }
        FieldKind::Record(r) => {
            out["fields"] = Value::Array(r.fields.iter().map(|f| describe(f)).collect());
        }
    }
    out
}
