//! envyaml - resolve and run environment-overridable YAML service config.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Locate the config document and dispatch to `check` or `serve`.
//! - Map failures to structured exit codes.
//!
//! Does NOT handle:
//! - Placeholder substitution or typed conversion (see `crates/config`).
//! - Component startup details (see `crates/bootstrap`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing so `.env` can provide clap
//!   defaults and placeholder values.

mod args;
mod commands;
mod error;
mod service;
mod shutdown;

use args::{Cli, Commands};
use clap::Parser;
use envyaml_config::ConfigLoader;
use error::{ExitCode, ExitCodeExt};

#[tokio::main]
async fn main() {
    // Load .env file BEFORE CLI parsing so clap env defaults can read .env values
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::ConfigError.as_i32());
    }

    let cli = Cli::parse();

    let exit_code = match run(cli).await {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("{:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let loader = cli.config_loader()?;

    match cli.command {
        Commands::Check { format } => commands::check::run(&loader, format),
        Commands::Serve => commands::serve::run(&loader).await,
    }
}
