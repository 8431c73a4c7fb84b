//! Keyed snapshot storage for ear-training configuration forms
//!
//! Provides the [`SnapshotStore`] abstraction used to persist form
//! configurations, an in-memory store, a directory-backed store with atomic
//! writes, and the [`Snapshot`] envelope written into each slot.

pub mod error;
pub mod file;
pub mod io;
pub mod key;
pub mod snapshot;
pub mod store;

pub use error::{Error, Result};
pub use file::FileStore;
pub use snapshot::{SNAPSHOT_VERSION, Snapshot};
pub use store::{MemoryStore, NullStore, SnapshotStore};
