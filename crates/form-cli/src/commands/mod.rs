//! Command implementations for form-cli

pub mod config;
pub mod inspect;
pub mod snapshot;

pub use config::{run_apply_preset, run_normalize};
pub use inspect::{run_check, run_defaults, run_presets};
pub use snapshot::{run_load, run_save};

use crate::error::Result;
use serde_json::Value;

/// Print `value` as pretty JSON on stdout
pub(crate) fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
