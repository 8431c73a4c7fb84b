//! Snapshot commands

use std::path::Path;

use colored::Colorize;

use super::print_json;
use crate::context::CliContext;
use crate::error::{CliError, Result};

/// Run the save command
pub fn run_save(
    ctx: &CliContext,
    schema_path: &Path,
    key: &str,
    config: Option<&Path>,
) -> Result<()> {
    let engine = ctx.engine_with_config(schema_path, config)?;
    engine.try_save_snapshot(key)?;
    eprintln!(
        "{} '{}' in {}",
        "Saved".green().bold(),
        key,
        ctx.store_dir().display()
    );
    print_json(&engine.get_current_config())
}

/// Run the load command
pub fn run_load(ctx: &CliContext, schema_path: &Path, key: &str) -> Result<()> {
    let mut engine = ctx.engine(schema_path)?;
    if !engine.load_snapshot(key) {
        return Err(CliError::user(format!("No snapshot stored under '{}'", key)));
    }
    print_json(&engine.get_current_config())
}
