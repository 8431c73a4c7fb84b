//! Field descriptors - the typed, immutable nodes of a schema tree
//!
//! A [`FieldDescriptor`] describes one configurable value. Its [`FieldKind`]
//! is a closed set of variants, each carrying its own attributes:
//!
//! - [`PrimitiveField`] - a scalar (text, integer, float, boolean, enum,
//!   structured data) with a declared default
//! - [`FixedCollectionField`] - exactly `labels.len()` positional items
//! - [`DynamicCollectionField`] - a runtime-resizable list with a
//!   minimum length and a removal policy
//! - [`RecordField`] - an ordered set of named fields
//!
//! Descriptors are shared through [`Arc`] so the same item type can back
//! many sibling instances without copying.

use crate::defaults::{default_of, implicit_default};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// A schema node describing one configurable value
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Identifier, unique among siblings. Collection item types have an empty id.
    pub id: String,
    /// Human readable label, if declared
    pub label: Option<String>,
    /// The field's kind and kind-specific attributes
    pub kind: FieldKind,
}

/// Closed set of field kinds
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Primitive(PrimitiveField),
    FixedCollection(FixedCollectionField),
    DynamicCollection(DynamicCollectionField),
    Record(RecordField),
}

/// Scalar field with a resolved default
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveField {
    pub ty: PrimitiveType,
    pub default: Value,
}

/// Scalar types understood by the engine
#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveType {
    Text,
    Integer,
    Float,
    Boolean,
    /// One value out of a closed list of options
    Enum { options: Vec<EnumOption> },
    /// Arbitrary nested data, edited as JSON text
    StructuredData,
}

/// One choice of an enum field
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EnumOption {
    pub value: String,
    #[serde(default)]
    pub label: Option<String>,
}

/// Fixed-arity, positionally labelled collection
#[derive(Debug, Clone, PartialEq)]
pub struct FixedCollectionField {
    pub item: Arc<FieldDescriptor>,
    pub labels: Vec<String>,
    /// One default per label position
    pub default: Vec<Value>,
}

/// Variable-arity collection of homogeneous items
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicCollectionField {
    pub item: Arc<FieldDescriptor>,
    pub labels: Vec<String>,
    pub default: Vec<Value>,
    pub min_length: usize,
    pub removal_policy: RemovalPolicy,
}

/// Ordered set of named fields
#[derive(Debug, Clone, PartialEq)]
pub struct RecordField {
    pub fields: Vec<Arc<FieldDescriptor>>,
}

/// Which removal actions a dynamic collection offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RemovalPolicy {
    /// Every item can be removed individually
    #[default]
    EachElement,
    /// Only the tail item can be removed
    OnlyLast,
    /// Both individual and tail removal
    EachAndLast,
}

impl RemovalPolicy {
    /// Whether `remove_at(k)` is offered for arbitrary `k`
    pub fn allows_remove_at(&self) -> bool {
        matches!(self, Self::EachElement | Self::EachAndLast)
    }

    /// Whether `remove_last()` is offered
    pub fn allows_remove_last(&self) -> bool {
        matches!(self, Self::OnlyLast | Self::EachAndLast)
    }
}

impl PrimitiveType {
    /// Short name used in log lines and CLI summaries
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Enum { .. } => "enum",
            Self::StructuredData => "structured-data",
        }
    }

    /// Whether `value` names one of this enum's options.
    ///
    /// Always false for non-enum types.
    pub fn has_option(&self, value: &str) -> bool {
        match self {
            Self::Enum { options } => options.iter().any(|o| o.value == value),
            _ => false,
        }
    }
}

impl FieldDescriptor {
    /// Primitive field with an explicit default, or the type's implicit one.
    pub fn primitive(id: impl Into<String>, ty: PrimitiveType, default: Option<Value>) -> Self {
        let default = default.unwrap_or_else(|| implicit_default(&ty));
        Self {
            id: id.into(),
            label: None,
            kind: FieldKind::Primitive(PrimitiveField { ty, default }),
        }
    }

    /// Fixed collection with one item per label.
    ///
    /// Positions missing from `default` take the item type's default.
    pub fn fixed_collection(
        id: impl Into<String>,
        item: FieldDescriptor,
        labels: Vec<String>,
        default: Option<Vec<Value>>,
    ) -> Self {
        let item = Arc::new(item);
        let declared = default.unwrap_or_default();
        let default = (0..labels.len())
            .map(|i| declared.get(i).cloned().unwrap_or_else(|| default_of(&item)))
            .collect();
        Self {
            id: id.into(),
            label: None,
            kind: FieldKind::FixedCollection(FixedCollectionField {
                item,
                labels,
                default,
            }),
        }
    }

    /// Dynamic collection starting with one item per `default` entry.
    pub fn dynamic_collection(
        id: impl Into<String>,
        item: FieldDescriptor,
        default: Option<Vec<Value>>,
    ) -> Self {
        Self {
            id: id.into(),
            label: None,
            kind: FieldKind::DynamicCollection(DynamicCollectionField {
                item: Arc::new(item),
                labels: Vec::new(),
                default: default.unwrap_or_default(),
                min_length: 0,
                removal_policy: RemovalPolicy::default(),
            }),
        }
    }

    /// Record of the given fields, in declaration order.
    pub fn record(id: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            id: id.into(),
            label: None,
            kind: FieldKind::Record(RecordField {
                fields: fields.into_iter().map(Arc::new).collect(),
            }),
        }
    }

    /// Set the minimum length of a dynamic collection. No effect on other kinds.
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        if let FieldKind::DynamicCollection(c) = &mut self.kind {
            c.min_length = min_length;
        }
        self
    }

    /// Set the removal policy of a dynamic collection. No effect on other kinds.
    pub fn with_removal_policy(mut self, policy: RemovalPolicy) -> Self {
        if let FieldKind::DynamicCollection(c) = &mut self.kind {
            c.removal_policy = policy;
        }
        self
    }

    /// Set per-item labels of a dynamic collection. No effect on other kinds.
    pub fn with_item_labels(mut self, labels: Vec<String>) -> Self {
        if let FieldKind::DynamicCollection(c) = &mut self.kind {
            c.labels = labels;
        }
        self
    }

    /// Copy of this descriptor whose defaults are replaced by `value`.
    ///
    /// Records take overrides per field id and keep the defaults of fields
    /// absent from `value`; collections take a sequence. A value of the wrong
    /// shape leaves the descriptor unchanged.
    pub fn with_default(&self, value: &Value) -> Self {
        let mut out = self.clone();
        match (&mut out.kind, value) {
            (FieldKind::Primitive(p), v) => p.default = v.clone(),
            (FieldKind::FixedCollection(f), Value::Array(items)) => {
                for (slot, v) in f.default.iter_mut().zip(items) {
                    *slot = v.clone();
                }
            }
            (FieldKind::DynamicCollection(c), Value::Array(items)) => {
                c.default = items.clone();
            }
            (FieldKind::Record(r), Value::Object(map)) => {
                for field in r.fields.iter_mut() {
                    if let Some(v) = map.get(&field.id) {
                        *field = Arc::new(field.with_default(v));
                    }
                }
            }
            _ => {}
        }
        out
    }

    /// Child field of a record by id
    pub fn field(&self, id: &str) -> Option<&Arc<FieldDescriptor>> {
        match &self.kind {
            FieldKind::Record(r) => r.fields.iter().find(|f| f.id == id),
            _ => None,
        }
    }

    /// Short kind name used in log lines and CLI summaries
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            FieldKind::Primitive(p) => p.ty.name(),
            FieldKind::FixedCollection(_) => "fixed-collection",
            FieldKind::DynamicCollection(_) => "dynamic-collection",
            FieldKind::Record(_) => "record",
        }
    }
}
