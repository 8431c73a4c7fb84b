//! Snapshot envelope written into a store slot
//!
//! ```json
//! {
//!   "version": 1,
//!   "saved_at": "2026-10-16T09:30:00Z",
//!   "config": { "tempo": 80 },
//!   "presets": { "chords": { "My triads": [] } }
//! }
//! ```
//!
//! A slot holding a bare configuration object (no envelope) is read as a
//! snapshot with no saved presets.

use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Current envelope version
pub const SNAPSHOT_VERSION: u32 = 1;

/// A persisted configuration plus the preset tables saved alongside it
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Snapshot {
    pub version: u32,
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
    pub config: Value,
    /// Field id -> (preset name -> value)
    #[serde(default)]
    pub presets: Map<String, Value>,
}

impl Snapshot {
    /// Envelope stamped with the current time
    pub fn new(config: Value, presets: Map<String, Value>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            saved_at: Some(Utc::now()),
            config,
            presets,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a slot's content.
    ///
    /// Returns `None` for malformed text, non-object payloads and envelopes
    /// of an unknown version.
    pub fn parse(content: &str) -> Option<Self> {
        let value: Value = match serde_json::from_str(content) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("Ignoring malformed snapshot: {}", e);
                return None;
            }
        };
        let Value::Object(map) = &value else {
            tracing::warn!("Ignoring snapshot that is not a JSON object");
            return None;
        };

        if !(map.contains_key("version") && map.contains_key("config")) {
            return Some(Self {
                version: SNAPSHOT_VERSION,
                saved_at: None,
                config: value,
                presets: Map::new(),
            });
        }

        match serde_json::from_value::<Snapshot>(value) {
            Ok(snapshot) if snapshot.version == SNAPSHOT_VERSION => Some(snapshot),
            Ok(snapshot) => {
                tracing::warn!(
                    "Ignoring snapshot with unsupported version {}",
                    snapshot.version
                );
                None
            }
            Err(e) => {
                tracing::warn!("Ignoring malformed snapshot envelope: {}", e);
                None
            }
        }
    }
}
