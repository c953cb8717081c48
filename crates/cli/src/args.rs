//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Resolve which config document a command reads.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `commands` module).
//! - Does not decode the document (see `envyaml_config::ConfigLoader`).

use clap::{Parser, Subcommand, ValueEnum};
use envyaml_config::ConfigLoader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "envyaml")]
#[command(about = "Resolve environment-overridable YAML service config", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  envyaml check --config service.yaml\n  DB_HOST=db envyaml check -c service.yaml --format json\n  ENVYAML_CONFIG_PATH=service.yaml envyaml serve\n"
)]
pub struct Cli {
    /// Path to the YAML config document.
    ///
    /// Can also be set via ENVYAML_CONFIG_PATH environment variable.
    #[arg(short, long, global = true, env = "ENVYAML_CONFIG_PATH", value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the document and print the typed result
    Check {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },

    /// Start logging, tracing, PostgreSQL and probes from the document
    Serve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}

impl Cli {
    /// Build the loader for this invocation.
    ///
    /// Blank `--config` values are ignored so `ENVYAML_CONFIG_PATH` can still apply.
    pub fn config_loader(&self) -> anyhow::Result<ConfigLoader> {
        let mut loader = ConfigLoader::new();
        if let Some(ref path) = self.config
            && !path.to_string_lossy().trim().is_empty()
        {
            loader = loader.with_config_path(path.clone());
        }
        Ok(loader.from_env()?)
    }
}
