//! Mapping of caller-supplied keys to store slot names
//!
//! Keys are arbitrary strings; slot names must be safe file names. A slot
//! name is the SHA-256 of the key, so distinct keys never collide and no
//! namespacing is imposed on callers.

use sha2::{Digest, Sha256};

/// Extension of every slot file
pub const SLOT_EXTENSION: &str = "json";

/// File name of the slot holding `key`.
pub fn slot_file_name(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    format!("{:x}.{}", hasher.finalize(), SLOT_EXTENSION)
}
