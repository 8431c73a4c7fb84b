//! Configuration commands

use std::path::Path;

use colored::Colorize;
use form_engine::PresetOutcome;
use serde_json::Value;

use super::print_json;
use crate::context::{CliContext, read_text};
use crate::error::{CliError, Result};

/// Run the normalize command
pub fn run_normalize(ctx: &CliContext, schema_path: &Path, config_path: &Path) -> Result<()> {
    let mut engine = ctx.engine(schema_path)?;
    engine.import_config(&read_text(config_path)?)?;
    println!("{}", engine.export_config()?);
    Ok(())
}

/// Run the apply-preset command
pub fn run_apply_preset(
    ctx: &CliContext,
    schema_path: &Path,
    field: &str,
    name: &str,
    config: Option<&Path>,
) -> Result<()> {
    let mut engine = ctx.engine_with_config(schema_path, config)?;
    match engine.apply_preset(field, name) {
        PresetOutcome::Applied => {
            eprintln!("{} preset '{}' to '{}'", "Applied".green().bold(), name, field);
        }
        PresetOutcome::NoChange => {
            eprintln!("{} '{}' leaves '{}' unchanged", "note:".cyan().bold(), name, field);
        }
        PresetOutcome::Missing => {
            return Err(CliError::user(format!(
                "No preset '{}' for field '{}'",
                name, field
            )));
        }
    }
    let config: Value = engine.get_current_config();
    print_json(&config)
}
