//! Shared test utilities for the earform workspace.
//!
//! Provides the schemas of the real ear-training tools as fixtures, plus
//! stores that make persistence observable in tests. It is a dev-dependency
//! only, never published.
//!
//! # Modules
//!
//! - [`schemas`] - chord-match and pitch-match schema fixtures
//! - [`store`] - [`RecordingStore`](store::RecordingStore) and a temporary
//!   [`FileStore`](form_store::FileStore)

pub mod schemas;
pub mod store;
