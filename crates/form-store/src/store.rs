//! The keyed store abstraction and its in-process implementations

use crate::{Error, Result};
use std::collections::HashMap;
use std::sync::Mutex;

/// A process-external keyed store with one text slot per key.
///
/// Implementations report failures as errors; callers that must keep
/// working without persistence decide how to degrade.
pub trait SnapshotStore: Send + Sync {
    /// Short name used in log lines
    fn name(&self) -> &str;

    /// Read the slot for `key`; `None` when nothing has been stored.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the slot for `key`.
    fn write(&self, key: &str, content: &str) -> Result<()>;

    /// Clear the slot for `key`. Clearing an empty slot succeeds.
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory store, shared safely between threads
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.slots.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SnapshotStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn read(&self, key: &str) -> Result<Option<String>> {
        let slots = self
            .slots
            .lock()
            .map_err(|_| Error::unavailable("memory store lock poisoned"))?;
        Ok(slots.get(key).cloned())
    }

    fn write(&self, key: &str, content: &str) -> Result<()> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| Error::unavailable("memory store lock poisoned"))?;
        slots.insert(key.to_string(), content.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| Error::unavailable("memory store lock poisoned"))?;
        slots.remove(key);
        Ok(())
    }
}

/// A store that is never available.
///
/// Stands in for environments without persistence: reads find nothing and
/// writes fail.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStore;

impl SnapshotStore for NullStore {
    fn name(&self) -> &str {
        "null"
    }

    fn read(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn write(&self, _key: &str, _content: &str) -> Result<()> {
        Err(Error::unavailable("no persistent store configured"))
    }

    fn remove(&self, _key: &str) -> Result<()> {
        Ok(())
    }
}
