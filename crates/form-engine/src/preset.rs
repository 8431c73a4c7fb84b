//! Named preset tables, one per target field
//!
//! A table maps preset names to configuration value fragments. Tables are
//! seeded from the schema's preset bindings and grow through saves; nothing
//! removes entries. Each engine owns its tables.
//!
//! # Example JSON
//!
//! ```json
//! {
//!   "chords": {
//!     "no change": [],
//!     "Triads": [{ "name": "Major", "offsets": [0, 4, 7] }]
//!   }
//! }
//! ```

use form_schema::Schema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Result of applying a preset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetOutcome {
    /// The preset value was written into the field
    Applied,
    /// The preset is the empty "no change" sentinel
    NoChange,
    /// No such table, preset or field; nothing was touched
    Missing,
}

/// Preset tables keyed by target field
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PresetTables {
    tables: BTreeMap<String, Map<String, Value>>,
}

impl PresetTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tables seeded from every preset binding of `schema`
    pub fn from_schema(schema: &Schema) -> Self {
        let mut tables = Self::new();
        for binding in schema.presets() {
            tables
                .tables
                .insert(binding.target_field.clone(), binding.entries.clone());
        }
        tables
    }

    pub fn get(&self, field: &str, name: &str) -> Option<&Value> {
        self.table(field)?.get(name)
    }

    /// Store a deep copy of `value` under `name`, replacing any previous entry.
    pub fn insert(&mut self, field: &str, name: &str, value: Value) -> Option<Value> {
        self.tables
            .entry(field.to_string())
            .or_default()
            .insert(name.to_string(), value)
    }

    /// Preset names of `field` in insertion order
    pub fn names(&self, field: &str) -> Vec<String> {
        self.table(field)
            .map(|table| table.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// The whole table of `field`, when one exists
    pub fn table(&self, field: &str) -> Option<&Map<String, Value>> {
        self.tables.get(field)
    }

    /// Target fields that have a table
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Fold saved tables (as stored in a snapshot) into these ones.
    ///
    /// Saved entries win over seeded ones of the same name.
    pub fn merge(&mut self, saved: &Map<String, Value>) {
        for (field, table) in saved {
            let Value::Object(entries) = table else {
                tracing::warn!("Ignoring saved presets for '{}': not a table", field);
                continue;
            };
            for (name, value) in entries {
                self.insert(field, name, value.clone());
            }
        }
    }

    /// All tables as one JSON map, for snapshots
    pub fn to_map(&self) -> Map<String, Value> {
        self.tables
            .iter()
            .map(|(field, table)| (field.clone(), Value::Object(table.clone())))
            .collect()
    }
}

/// Whether `value` is the empty "no change" sentinel
pub fn is_no_change(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}
