//! Error types for form-schema

use std::path::PathBuf;

/// Result type for form-schema operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading or validating a schema
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} schema: {message}")]
    Parse { format: String, message: String },

    #[error("Unsupported schema format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Duplicate field id '{id}' in {container}")]
    DuplicateFieldId { id: String, container: String },

    #[error("Field in {container} has no id")]
    MissingFieldId { container: String },

    #[error("Fixed list '{id}' declares no labels")]
    EmptyFixedList { id: String },

    #[error("Default '{value}' of '{id}' is not one of its options")]
    InvalidEnumDefault { id: String, value: String },

    #[error("Preset selector targets unknown field '{field}'")]
    UnknownPresetTarget { field: String },

    #[error("Preset source '{source_name}' is not declared in presets")]
    UnknownPresetSource { source_name: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            format: format.into(),
            message: message.into(),
        }
    }
}
