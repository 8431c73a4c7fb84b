//! Error types for form-engine

/// Result type for form-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to callers of the engine API.
///
/// Malformed field input, refused collection changes and missing presets are
/// not errors; they are recovered locally or reported through return values.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to import configuration: {message}")]
    Import { message: String },

    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("No field at path '{path}'")]
    FieldNotFound { path: String },

    #[error("Preset name must not be empty")]
    EmptyPresetName,

    #[error("Engine has been torn down")]
    TornDown,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] form_store::Error),
}

impl Error {
    pub fn import(message: impl Into<String>) -> Self {
        Self::Import {
            message: message.into(),
        }
    }

    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn field_not_found(path: impl ToString) -> Self {
        Self::FieldNotFound {
            path: path.to_string(),
        }
    }
}
