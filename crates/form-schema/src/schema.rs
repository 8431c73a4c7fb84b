//! Validated schema model built from a [`SchemaDocument`]

use crate::document::{ControlSpec, SchemaDocument};
use crate::field::{EnumOption, FieldDescriptor, FieldKind, PrimitiveType};
use crate::validation;
use crate::{Error, Result};
use serde_json::{Map, Value};
use std::sync::Arc;

/// A validated, immutable form schema.
///
/// The root is an implicit record holding every value control of every
/// section, in document order.
#[derive(Debug, Clone)]
pub struct Schema {
    title: Option<String>,
    root: Arc<FieldDescriptor>,
    sections: Vec<Section>,
    presets: Vec<PresetBinding>,
}

/// Layout grouping of top-level fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: Option<String>,
    pub field_ids: Vec<String>,
}

/// Preset library bound to one target field
#[derive(Debug, Clone, PartialEq)]
pub struct PresetBinding {
    pub target_field: String,
    pub source: String,
    /// Preset name -> value, in declaration order
    pub entries: Map<String, Value>,
}

impl Schema {
    /// Build a schema from top-level fields, without sections or presets.
    pub fn new(title: Option<String>, fields: Vec<FieldDescriptor>) -> Result<Self> {
        let root = FieldDescriptor::record("", fields);
        validation::check_descriptor(&root, "schema root")?;
        let sections = vec![Section {
            title: None,
            field_ids: root_field_ids(&root),
        }];
        Ok(Self {
            title,
            root: Arc::new(root),
            sections,
            presets: Vec::new(),
        })
    }

    /// Build and validate a schema from a parsed document.
    pub fn from_document(doc: SchemaDocument) -> Result<Self> {
        let mut fields = Vec::new();
        let mut sections = Vec::new();
        let mut selectors = Vec::new();

        for section in doc.sections {
            let mut field_ids = Vec::new();
            for control in section.controls {
                match control {
                    ControlSpec::PresetSelector(sel) => selectors.push(sel),
                    ControlSpec::Label(_) | ControlSpec::ImportExport(_) => {}
                    other => {
                        let field = convert_control(other)?;
                        field_ids.push(field.id.clone());
                        fields.push(field);
                    }
                }
            }
            sections.push(Section {
                title: section.title,
                field_ids,
            });
        }

        let root = FieldDescriptor::record("", fields);
        validation::check_descriptor(&root, "schema root")?;

        let mut presets: Vec<PresetBinding> = Vec::new();
        for sel in selectors {
            if root.field(&sel.target_field).is_none() {
                return Err(Error::UnknownPresetTarget {
                    field: sel.target_field,
                });
            }
            let Some(entries) = doc.presets.get(&sel.preset_source) else {
                return Err(Error::UnknownPresetSource {
                    source_name: sel.preset_source,
                });
            };
            if presets.iter().any(|p| p.target_field == sel.target_field) {
                tracing::warn!(
                    "Field '{}' has more than one preset selector, keeping the first",
                    sel.target_field
                );
                continue;
            }
            presets.push(PresetBinding {
                target_field: sel.target_field,
                source: sel.preset_source,
                entries: entries.clone(),
            });
        }

        Ok(Self {
            title: doc.title,
            root: Arc::new(root),
            sections,
            presets,
        })
    }

    /// Parse and validate a JSON schema document
    pub fn from_json_str(source: &str) -> Result<Self> {
        Self::from_document(SchemaDocument::from_json_str(source)?)
    }

    /// Bind a preset library to a top-level field.
    pub fn with_presets(
        mut self,
        target_field: impl Into<String>,
        source: impl Into<String>,
        entries: Map<String, Value>,
    ) -> Result<Self> {
        let target_field = target_field.into();
        if self.root.field(&target_field).is_none() {
            return Err(Error::UnknownPresetTarget {
                field: target_field,
            });
        }
        self.presets.retain(|p| p.target_field != target_field);
        self.presets.push(PresetBinding {
            target_field,
            source: source.into(),
            entries,
        });
        Ok(self)
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The implicit root record
    pub fn root(&self) -> &Arc<FieldDescriptor> {
        &self.root
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn presets(&self) -> &[PresetBinding] {
        &self.presets
    }

    /// Top-level field by id
    pub fn field(&self, id: &str) -> Option<&Arc<FieldDescriptor>> {
        self.root.field(id)
    }

    /// Top-level fields in declaration order
    pub fn fields(&self) -> &[Arc<FieldDescriptor>] {
        match &self.root.kind {
            FieldKind::Record(r) => &r.fields,
            _ => &[],
        }
    }
}

fn root_field_ids(root: &FieldDescriptor) -> Vec<String> {
    match &root.kind {
        FieldKind::Record(r) => r.fields.iter().map(|f| f.id.clone()).collect(),
        _ => Vec::new(),
    }
}

/// Convert one document control into a field descriptor.
///
/// Layout-only controls nested where a value is expected (e.g. as a list's
/// item type) are rejected.
fn convert_control(control: ControlSpec) -> Result<FieldDescriptor> {
    let field = match control {
        ControlSpec::Int(p) => primitive(p.id, p.label, PrimitiveType::Integer, p.default),
        ControlSpec::Float(p) => primitive(p.id, p.label, PrimitiveType::Float, p.default),
        ControlSpec::Text(p) => primitive(p.id, p.label, PrimitiveType::Text, p.default),
        ControlSpec::Boolean(p) => primitive(p.id, p.label, PrimitiveType::Boolean, p.default),
        ControlSpec::Json(p) => primitive(p.id, p.label, PrimitiveType::StructuredData, p.default),
        ControlSpec::Radio(r) => {
            let options: Vec<EnumOption> = r.options;
            primitive(r.id, r.label, PrimitiveType::Enum { options }, r.default)
        }
        ControlSpec::FixedList(f) => {
            let item = convert_control(*f.item_type)?;
            let mut field = FieldDescriptor::fixed_collection(f.id, item, f.labels, f.default);
            field.label = f.label;
            field
        }
        ControlSpec::DynamicList(d) => {
            let item = convert_control(*d.item_type)?;
            let mut field = FieldDescriptor::dynamic_collection(d.id, item, d.default)
                .with_min_length(d.min_length)
                .with_removal_policy(d.removal_policy)
                .with_item_labels(d.labels);
            field.label = d.label;
            field
        }
        ControlSpec::Struct(s) => {
            let fields = s
                .fields
                .into_iter()
                .filter(|c| c.field_id().is_some())
                .map(convert_control)
                .collect::<Result<Vec<_>>>()?;
            let mut field = FieldDescriptor::record(s.id, fields);
            field.label = s.label;
            match s.default {
                Some(default) => field.with_default(&default),
                None => field,
            }
        }
        ControlSpec::Label(_) | ControlSpec::ImportExport(_) | ControlSpec::PresetSelector(_) => {
            return Err(Error::parse(
                "schema",
                "layout controls cannot be used as a value type",
            ));
        }
    };
    Ok(field)
}

fn primitive(
    id: String,
    label: Option<String>,
    ty: PrimitiveType,
    default: Option<Value>,
) -> FieldDescriptor {
    let mut field = FieldDescriptor::primitive(id, ty, default);
    field.label = label;
    field
}
