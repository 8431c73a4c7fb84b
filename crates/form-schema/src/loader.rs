//! Format-agnostic schema loading
//!
//! The format is picked from the file extension:
//! - `.json` -> JSON
//! - `.toml` -> TOML
//! - `.yaml`, `.yml` -> YAML

use crate::document::SchemaDocument;
use crate::schema::Schema;
use crate::{Error, Result};
use std::fs;
use std::path::Path;

/// Loads schema documents from disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct SchemaLoader;

impl SchemaLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load and validate a schema file.
    pub fn load(&self, path: &Path) -> Result<Schema> {
        let document = self.load_document(path)?;
        let schema = Schema::from_document(document)?;
        tracing::debug!(
            "Loaded schema {:?} with {} top-level fields",
            path,
            schema.fields().len()
        );
        Ok(schema)
    }

    /// Parse a schema file without validating it.
    pub fn load_document(&self, path: &Path) -> Result<SchemaDocument> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "json" => serde_json::from_str(&content).map_err(|e| Error::parse("JSON", e.to_string())),
            "toml" => toml::from_str(&content).map_err(|e| Error::parse("TOML", e.to_string())),
            "yaml" | "yml" => {
                serde_yaml::from_str(&content).map_err(|e| Error::parse("YAML", e.to_string()))
            }
            _ => Err(Error::UnsupportedFormat { extension }),
        }
    }
}
