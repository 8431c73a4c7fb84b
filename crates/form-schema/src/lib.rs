//! Declarative field schemas for ear-training configuration forms.
//!
//! A schema describes a tree of typed, nestable fields (primitives, fixed
//! and dynamic collections, records) together with named preset libraries.
//! Schemas are pure data: they are parsed and validated once and then shared
//! read-only by every live form built from them.

pub mod defaults;
pub mod document;
pub mod error;
pub mod field;
pub mod loader;
pub mod schema;
pub mod validation;

pub use defaults::{default_of, implicit_default};
pub use document::SchemaDocument;
pub use error::{Error, Result};
pub use field::{
    DynamicCollectionField, EnumOption, FieldDescriptor, FieldKind, FixedCollectionField,
    PrimitiveField, PrimitiveType, RecordField, RemovalPolicy,
};
pub use loader::SchemaLoader;
pub use schema::{PresetBinding, Schema, Section};
