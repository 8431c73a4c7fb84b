//! Schema-driven configuration engine for ear-training forms
//!
//! Materializes a [`form_schema::Schema`] into an editable live tree and
//! binds it two ways to plain configuration values:
//!
//! - **Paths** ([`path`]) address every node instance, including repeated
//!   fields inside collection items
//! - **Live tree** ([`live`]) owns the nodes and the path index
//! - **Serializer** ([`serialize`], [`coerce`]) reads and writes
//!   configuration values with per-type coercion
//! - **Collections** ([`collection`]) grow and shrink dynamic lists under
//!   their removal policy and minimum length
//! - **Presets** ([`preset`]) keep named per-field value libraries
//! - **Engine** ([`engine`]) ties these together with snapshot persistence
//!   and autosave

pub mod coerce;
pub mod collection;
pub mod engine;
pub mod error;
pub mod live;
pub mod path;
pub mod preset;
pub mod serialize;

pub use collection::{CollectionChange, RefusalReason};
pub use engine::{EngineOptions, FormEngine};
pub use error::{Error, Result};
pub use live::{LiveNode, LiveTree, NodeId};
pub use path::{Path, PathSegment};
pub use preset::{PresetOutcome, PresetTables};
