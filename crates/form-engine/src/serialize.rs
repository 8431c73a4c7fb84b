//! Conversion between the live tree and plain configuration values
//!
//! `serialize` is a pure read of the live tree. `deserialize` writes a value
//! back top-down: records take only the fields present in the value, fixed
//! collections are written positionally, and dynamic collections are first
//! resized to the incoming length. Container shapes that do not match the
//! schema leave that subtree untouched, so deserializing never fails.

use crate::coerce::{coerce_value, parse_text};
use crate::live::{LiveTree, NodeBody, NodeId};
use form_schema::FieldKind;
use serde_json::{Map, Value};

impl LiveTree {
    /// Configuration value of the whole tree; `null` once torn down.
    pub fn serialize(&self) -> Value {
        self.root()
            .map(|root| self.serialize_node(root))
            .unwrap_or(Value::Null)
    }

    /// Configuration value of the subtree rooted at `id`
    pub fn serialize_node(&self, id: NodeId) -> Value {
        let Some(node) = self.node(id) else {
            return Value::Null;
        };
        match node.body() {
            NodeBody::Primitive { value, .. } => value.clone(),
            NodeBody::Collection { items } => {
                Value::Array(items.iter().map(|item| self.serialize_node(*item)).collect())
            }
            NodeBody::Record { fields } => {
                let mut map = Map::new();
                for field in fields {
                    if let Some(child) = self.node(*field) {
                        map.insert(child.descriptor().id.clone(), self.serialize_node(*field));
                    }
                }
                Value::Object(map)
            }
        }
    }

    /// Write `value` onto the whole tree.
    pub(crate) fn deserialize(&mut self, value: &Value) {
        if let Some(root) = self.root() {
            self.deserialize_node(root, value);
        }
    }

    /// Write `value` onto the subtree rooted at `id`.
    pub(crate) fn deserialize_node(&mut self, id: NodeId, value: &Value) {
        let Some(node) = self.node(id) else {
            return;
        };
        let descriptor = node.descriptor().clone();

        match (&descriptor.kind, value) {
            (FieldKind::Primitive(p), _) => {
                if let Some(NodeBody::Primitive { default, value: current }) =
                    self.node_mut(id).map(|n| n.body_mut())
                {
                    *current = coerce_value(&p.ty, value, default, current);
                }
            }
            (FieldKind::FixedCollection(_), Value::Array(incoming)) => {
                let items = node.children().to_vec();
                for (item, v) in items.into_iter().zip(incoming) {
                    self.deserialize_node(item, v);
                }
            }
            (FieldKind::DynamicCollection(_), Value::Array(incoming)) => {
                self.resize(id, incoming.len());
                let items = self.node(id).map(|n| n.children().to_vec()).unwrap_or_default();
                for (item, v) in items.into_iter().zip(incoming) {
                    self.deserialize_node(item, v);
                }
            }
            (FieldKind::Record(_), Value::Object(incoming)) => {
                let fields = node.children().to_vec();
                for field in fields {
                    let key = match self.node(field) {
                        Some(child) => child.descriptor().id.clone(),
                        None => continue,
                    };
                    if let Some(v) = incoming.get(&key) {
                        self.deserialize_node(field, v);
                    }
                }
            }
            (_, other) => {
                tracing::debug!(
                    "Skipping {} at '{}': got {}",
                    descriptor.kind_name(),
                    node.path(),
                    shape_name(other)
                );
            }
        }
    }

    /// Apply raw editor text to the primitive `id`.
    ///
    /// Returns false when `id` is not a primitive.
    pub(crate) fn set_text(&mut self, id: NodeId, text: &str) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        let FieldKind::Primitive(p) = &node.descriptor().kind else {
            return false;
        };
        let ty = p.ty.clone();
        match node.body_mut() {
            NodeBody::Primitive { default, value } => {
                *value = parse_text(&ty, text, default, value);
                true
            }
            _ => false,
        }
    }
}

fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a map",
    }
}
