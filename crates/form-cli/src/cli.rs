//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// earform - Inspect and drive ear-training configuration forms
#[derive(Parser, Debug)]
#[command(name = "earform")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding saved snapshots
    #[arg(long, global = true, env = "EARFORM_STORE_DIR")]
    pub store_dir: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Validate a schema and summarize its fields and presets
    Check {
        /// Schema file (.json, .toml, .yaml)
        schema: PathBuf,
    },

    /// Print the default configuration of a schema
    Defaults {
        /// Schema file (.json, .toml, .yaml)
        schema: PathBuf,
    },

    /// Import a configuration and print it as the form would export it
    ///
    /// Shows how each value is coerced to its field's type.
    Normalize {
        /// Schema file (.json, .toml, .yaml)
        schema: PathBuf,

        /// Configuration JSON file
        config: PathBuf,
    },

    /// List the presets available for a field
    Presets {
        /// Schema file (.json, .toml, .yaml)
        schema: PathBuf,

        /// Target field path (e.g. chords)
        field: String,
    },

    /// Apply a preset and print the resulting configuration
    ApplyPreset {
        /// Schema file (.json, .toml, .yaml)
        schema: PathBuf,

        /// Target field path (e.g. chords)
        field: String,

        /// Preset name
        name: String,

        /// Start from this configuration instead of the defaults
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Save a snapshot under a key
    Save {
        /// Schema file (.json, .toml, .yaml)
        schema: PathBuf,

        /// Snapshot key
        key: String,

        /// Configuration to save instead of the defaults
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the configuration saved under a key
    Load {
        /// Schema file (.json, .toml, .yaml)
        schema: PathBuf,

        /// Snapshot key
        key: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_apply_preset() {
        let cli = Cli::try_parse_from([
            "earform",
            "apply-preset",
            "chord.json",
            "chords",
            "Major Scale Triads",
            "--config",
            "mine.json",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Commands::ApplyPreset {
                schema: PathBuf::from("chord.json"),
                field: "chords".into(),
                name: "Major Scale Triads".into(),
                config: Some(PathBuf::from("mine.json")),
            }
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "earform",
            "load",
            "s.json",
            "k",
            "--store-dir",
            "/tmp/snaps",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.store_dir, Some(PathBuf::from("/tmp/snaps")));
    }
}
