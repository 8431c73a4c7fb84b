//! Shared command context
//!
//! Resolves the snapshot directory and builds engines for a schema file.

use crate::error::{CliError, Result};
use form_engine::{EngineOptions, FormEngine};
use form_schema::{Schema, SchemaLoader};
use form_store::{FileStore, SnapshotStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const APP_DIR: &str = "earform";

/// Everything a command needs besides its own arguments
#[derive(Debug, Clone)]
pub struct CliContext {
    store_dir: PathBuf,
}

impl CliContext {
    /// Use `store_dir` when given (flag or `EARFORM_STORE_DIR`), else the
    /// platform data directory.
    pub fn resolve(store_dir: Option<PathBuf>) -> Result<Self> {
        let store_dir = match store_dir {
            Some(dir) => dir,
            None => dirs::data_dir()
                .map(|d| d.join(APP_DIR))
                .ok_or_else(|| CliError::user("No data directory found; pass --store-dir"))?,
        };
        tracing::debug!("Using snapshot directory {:?}", store_dir);
        Ok(Self { store_dir })
    }

    pub fn store_dir(&self) -> &Path {
        &self.store_dir
    }

    pub fn store(&self) -> Arc<dyn SnapshotStore> {
        Arc::new(FileStore::new(self.store_dir.clone()))
    }

    pub fn load_schema(&self, path: &Path) -> Result<Schema> {
        Ok(SchemaLoader::new().load(path)?)
    }

    /// Engine on defaults, without autosave
    pub fn engine(&self, schema_path: &Path) -> Result<FormEngine> {
        let schema = self.load_schema(schema_path)?;
        Ok(FormEngine::create(
            schema,
            self.store(),
            EngineOptions::default(),
        ))
    }

    /// Engine seeded from a configuration file when one is given
    pub fn engine_with_config(
        &self,
        schema_path: &Path,
        config: Option<&Path>,
    ) -> Result<FormEngine> {
        let mut engine = self.engine(schema_path)?;
        if let Some(config) = config {
            engine.import_config(&read_text(config)?)?;
        }
        Ok(engine)
    }
}

pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| CliError::user(format!("Cannot read {}: {}", path.display(), e)))
}
