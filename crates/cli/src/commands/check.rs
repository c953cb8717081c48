//! Check command: resolve a service document and print the result.
//!
//! Responsibilities:
//! - Load the document with every `${NAME}` substituted and converted.
//! - Print the typed result as YAML or JSON on stdout.
//!
//! Does NOT handle:
//! - Starting any component (see serve.rs).
//!
//! Invariants:
//! - Nothing is printed unless the whole document resolves.
//! - Postgres passwords are masked in the output.

use anyhow::{Context, Result};
use envyaml_config::ConfigLoader;

use crate::args::OutputFormat;
use crate::service::ServiceConfig;

pub fn run(loader: &ConfigLoader, format: OutputFormat) -> Result<()> {
    let config: ServiceConfig = loader.load()?;
    print!("{}", render(&config, format)?);
    Ok(())
}

fn render(config: &ServiceConfig, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => serde_yaml::to_string(config).context("Failed to render YAML"),
        OutputFormat::Json => serde_json::to_string_pretty(config)
            .map(|json| json + "\n")
            .context("Failed to render JSON"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use envyaml_config::{MapEnv, from_yaml_str_with};

    fn config() -> ServiceConfig {
        let env = MapEnv::new().with_var("PORT", "4317");
        from_yaml_str_with(
            "jaeger:\n  agent_host: jaeger\n  agent_port: ${PORT}\n  service_name: billing\n",
            env,
        )
        .unwrap()
    }

    #[test]
    fn test_render_json_keeps_types() {
        let out = render(&config(), OutputFormat::Json).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["jaeger"]["agent_port"], 4317);
        assert_eq!(json["jaeger"]["agent_host"], "jaeger");
    }

    #[test]
    fn test_render_yaml() {
        let out = render(&config(), OutputFormat::Yaml).unwrap();
        assert!(out.contains("agent_port: 4317"), "got: {out}");
    }
}
