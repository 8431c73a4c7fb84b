//! Stores that make persistence observable in tests

use form_store::{FileStore, MemoryStore, Result, SnapshotStore};
use std::sync::Mutex;
use tempfile::TempDir;

/// In-memory store that records every write.
#[derive(Debug, Default)]
pub struct RecordingStore {
    inner: MemoryStore,
    writes: Mutex<Vec<String>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys written so far, in order
    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().unwrap().len()
    }

    pub fn clear_writes(&self) {
        self.writes.lock().unwrap().clear();
    }

    /// Stored text for `key`
    pub fn content(&self, key: &str) -> Option<String> {
        self.inner.read(key).unwrap()
    }
}

impl SnapshotStore for RecordingStore {
    fn name(&self) -> &str {
        "recording"
    }

    fn read(&self, key: &str) -> Result<Option<String>> {
        self.inner.read(key)
    }

    fn write(&self, key: &str, content: &str) -> Result<()> {
        self.writes.lock().unwrap().push(key.to_string());
        self.inner.write(key, content)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.inner.remove(key)
    }
}

/// A [`FileStore`] in a fresh temporary directory.
///
/// The directory lives as long as the returned [`TempDir`].
pub fn temp_file_store() -> (TempDir, FileStore) {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path().join("snapshots"));
    (dir, store)
}
