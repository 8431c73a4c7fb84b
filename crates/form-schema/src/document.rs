//! Schema document format
//!
//! The on-disk layout of a form schema: a title, a list of sections of
//! controls, and named preset libraries.
//!
//! # Example
//!
//! ```json
//! {
//!   "title": "Pitch Match Configuration",
//!   "sections": [
//!     {
//!       "title": "Solfege Weights",
//!       "controls": [
//!         { "type": "preset-selector", "targetField": "solfegeWeights", "presetSource": "solfegePresets" },
//!         { "type": "fixedList", "id": "solfegeWeights", "itemType": { "type": "number" },
//!           "labels": ["do", "ra", "re"], "default": [10, 0, 10] }
//!       ]
//!     }
//!   ],
//!   "presets": { "solfegePresets": { "no change": [], "Major": [10, 0, 10] } }
//! }
//! ```
//!
//! Presentation attributes (`min`, `max`, `cssClass`, `displayFunction`, ...)
//! are accepted and ignored; they belong to whoever renders the form.

use crate::field::{EnumOption, RemovalPolicy};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Top-level schema document
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SchemaDocument {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub sections: Vec<SectionSpec>,
    /// Preset source name -> (preset name -> value)
    #[serde(default)]
    pub presets: BTreeMap<String, Map<String, Value>>,
}

/// A titled group of controls
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SectionSpec {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub controls: Vec<ControlSpec>,
}

/// One control, tagged by its `type`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum ControlSpec {
    #[serde(rename = "int", alias = "integer")]
    Int(PrimitiveSpec),
    #[serde(rename = "float", alias = "number")]
    Float(PrimitiveSpec),
    #[serde(rename = "text", alias = "string")]
    Text(PrimitiveSpec),
    #[serde(rename = "boolean", alias = "checkbox")]
    Boolean(PrimitiveSpec),
    #[serde(rename = "radio", alias = "enum")]
    Radio(RadioSpec),
    #[serde(rename = "json")]
    Json(PrimitiveSpec),
    #[serde(rename = "fixedList")]
    FixedList(FixedListSpec),
    #[serde(rename = "dynamicList")]
    DynamicList(DynamicListSpec),
    #[serde(rename = "struct")]
    Struct(StructSpec),
    #[serde(rename = "label")]
    Label(LabelSpec),
    #[serde(rename = "import-export")]
    ImportExport(LabelSpec),
    #[serde(rename = "preset-selector")]
    PresetSelector(PresetSelectorSpec),
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PrimitiveSpec {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub default: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RadioSpec {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub options: Vec<EnumOption>,
    #[serde(default)]
    pub default: Option<Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedListSpec {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    pub item_type: Box<ControlSpec>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub default: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicListSpec {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    pub item_type: Box<ControlSpec>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub default: Option<Vec<Value>>,
    #[serde(default)]
    pub min_length: usize,
    #[serde(default, rename = "removeType")]
    pub removal_policy: RemovalPolicy,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StructSpec {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub fields: Vec<ControlSpec>,
    /// Per-field overrides of the fields' own defaults
    #[serde(default)]
    pub default: Option<Value>,
}

/// Value-less control (static text, import/export buttons)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LabelSpec {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetSelectorSpec {
    pub target_field: String,
    pub preset_source: String,
}

impl ControlSpec {
    /// Id of a value-carrying control; `None` for layout-only controls.
    pub fn field_id(&self) -> Option<&str> {
        match self {
            Self::Int(p) | Self::Float(p) | Self::Text(p) | Self::Boolean(p) | Self::Json(p) => {
                Some(&p.id)
            }
            Self::Radio(r) => Some(&r.id),
            Self::FixedList(f) => Some(&f.id),
            Self::DynamicList(d) => Some(&d.id),
            Self::Struct(s) => Some(&s.id),
            Self::Label(_) | Self::ImportExport(_) | Self::PresetSelector(_) => None,
        }
    }
}

impl SchemaDocument {
    /// Parse a JSON schema document
    pub fn from_json_str(source: &str) -> crate::Result<Self> {
        serde_json::from_str(source).map_err(|e| crate::Error::parse("JSON", e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_type_aliases() {
        let doc = SchemaDocument::from_json_str(
            r#"{"sections": [{"controls": [
                {"type": "checkbox", "id": "a"},
                {"type": "string", "id": "b"},
                {"type": "number", "id": "c", "min": 0, "step": "any"}
            ]}]}"#,
        )
        .unwrap();
        let controls = &doc.sections[0].controls;
        assert!(matches!(controls[0], ControlSpec::Boolean(_)));
        assert!(matches!(controls[1], ControlSpec::Text(_)));
        assert!(matches!(controls[2], ControlSpec::Float(_)));
    }

    #[test]
    fn test_parse_dynamic_list_attributes() {
        let doc = SchemaDocument::from_json_str(
            r#"{"sections": [{"controls": [{
                "type": "dynamicList", "id": "intervalWeights",
                "itemType": {"type": "number", "min": 0},
                "labelFunction": "getIntervalLabel",
                "default": [10, 20], "minLength": 1, "removeType": "onlyLast"
            }]}]}"#,
        )
        .unwrap();
        let ControlSpec::DynamicList(list) = &doc.sections[0].controls[0] else {
            panic!("expected dynamic list");
        };
        assert_eq!(list.min_length, 1);
        assert_eq!(list.removal_policy, RemovalPolicy::OnlyLast);
        assert_eq!(list.default.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_layout_controls_have_no_field_id() {
        let doc = SchemaDocument::from_json_str(
            r#"{"sections": [{"controls": [
                {"type": "import-export"},
                {"type": "label", "text": "Hello", "cssClass": "note"},
                {"type": "preset-selector", "targetField": "x", "presetSource": "y"}
            ]}]}"#,
        )
        .unwrap();
        assert!(doc.sections[0].controls.iter().all(|c| c.field_id().is_none()));
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let result = SchemaDocument::from_json_str(
            r#"{"sections": [{"controls": [{"type": "slider", "id": "x"}]}]}"#,
        );
        assert!(result.is_err());
    }
}
