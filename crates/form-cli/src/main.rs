//! earform CLI
//!
//! Drives the configuration engine against schema files and a snapshot
//! directory. Every command prints JSON on stdout.

mod cli;
mod commands;
mod context;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use context::CliContext;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{} {}", "warning:".yellow().bold(), e);
    }
    tracing::debug!("Verbose mode enabled");

    let ctx = CliContext::resolve(cli.store_dir)?;
    execute_command(&ctx, cli.command)
}

fn execute_command(ctx: &CliContext, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Check { schema } => commands::run_check(ctx, &schema),
        Commands::Defaults { schema } => commands::run_defaults(ctx, &schema),
        Commands::Normalize { schema, config } => commands::run_normalize(ctx, &schema, &config),
        Commands::Presets { schema, field } => commands::run_presets(ctx, &schema, &field),
        Commands::ApplyPreset {
            schema,
            field,
            name,
            config,
        } => commands::run_apply_preset(ctx, &schema, &field, &name, config.as_deref()),
        Commands::Save {
            schema,
            key,
            config,
        } => commands::run_save(ctx, &schema, &key, config.as_deref()),
        Commands::Load { schema, key } => commands::run_load(ctx, &schema, &key),
    }
}
