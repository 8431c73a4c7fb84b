//! Directory-backed snapshot store

use crate::store::SnapshotStore;
use crate::{Result, io, key};
use std::path::{Path, PathBuf};

/// Stores each key in its own file under a directory.
///
/// Writes are atomic (temp file + rename), so a crash mid-save leaves the
/// previous snapshot intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`
    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(key::slot_file_name(key))
    }
}

impl SnapshotStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    fn read(&self, key: &str) -> Result<Option<String>> {
        io::read_text_if_exists(&self.slot_path(key))
    }

    fn write(&self, key: &str, content: &str) -> Result<()> {
        let path = self.slot_path(key);
        tracing::debug!("Writing snapshot '{}' to {:?}", key, path);
        io::write_atomic(&path, content.as_bytes())
    }

    fn remove(&self, key: &str) -> Result<()> {
        io::remove_if_exists(&self.slot_path(key))
    }
}
