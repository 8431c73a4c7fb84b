//! Default value computation
//!
//! Every call returns a freshly built, owned value. Sibling instances of the
//! same item type each receive their own copy, so editing one can never leak
//! into another.

use crate::field::{FieldDescriptor, FieldKind, PrimitiveType};
use serde_json::{Map, Value};

/// Deep, independent copy of the default declared by `descriptor`.
pub fn default_of(descriptor: &FieldDescriptor) -> Value {
    match &descriptor.kind {
        FieldKind::Primitive(p) => p.default.clone(),
        FieldKind::FixedCollection(f) => items_of(&f.item, &f.default),
        FieldKind::DynamicCollection(c) => items_of(&c.item, &c.default),
        FieldKind::Record(r) => {
            let mut map = Map::new();
            for field in &r.fields {
                map.insert(field.id.clone(), default_of(field));
            }
            Value::Object(map)
        }
    }
}

/// Declared collection entries, each completed against the item type so a
/// partial record entry still yields every field.
fn items_of(item: &FieldDescriptor, entries: &[Value]) -> Value {
    entries
        .iter()
        .map(|entry| default_of(&item.with_default(entry)))
        .collect()
}

/// Default used when a primitive declares none.
pub fn implicit_default(ty: &PrimitiveType) -> Value {
    match ty {
        PrimitiveType::Text => Value::String(String::new()),
        PrimitiveType::Integer => Value::from(0),
        PrimitiveType::Float => Value::from(0.0),
        PrimitiveType::Boolean => Value::Bool(false),
        PrimitiveType::Enum { options } => options
            .first()
            .map(|o| Value::String(o.value.clone()))
            .unwrap_or_else(|| Value::String(String::new())),
        PrimitiveType::StructuredData => Value::Null,
    }
}
