//! Serve command: bring up the components a service document configures.
//!
//! Responsibilities:
//! - Install JSON logging, with OTLP span export when a `jaeger` section exists.
//! - Connect and check PostgreSQL when a `postgres` section exists.
//! - Serve the health probes until Ctrl+C or SIGTERM.
//!
//! Does NOT handle:
//! - Printing the resolved document (see check.rs).
//!
//! Invariants:
//! - The document is fully resolved before any component starts.
//! - Spans are flushed and the pool closed on every exit path after startup.

use anyhow::Result;
use envyaml_bootstrap::{LoggerConfig, Postgres, Probe, init_logger, init_tracer};
use envyaml_config::ConfigLoader;
use tracing::{Instrument, info};

use crate::service::ServiceConfig;
use crate::shutdown::shutdown_signal;

pub async fn run(loader: &ConfigLoader) -> Result<()> {
    let config: ServiceConfig = loader.load()?;
    let logger = config.logger.clone().unwrap_or_default();

    let tracing_guard = match config.jaeger {
        Some(ref jaeger) => Some(init_tracer(jaeger, &logger)?),
        None => None,
    };
    let span = match tracing_guard {
        Some(ref guard) => guard.span().clone(),
        None => init_logger(&logger)?,
    };

    let result = run_components(&config, &logger).instrument(span).await;

    if let Some(guard) = tracing_guard {
        guard.shutdown();
    }
    result
}

async fn run_components(config: &ServiceConfig, logger: &LoggerConfig) -> Result<()> {
    info!(app = %logger.app, "starting service");
    let probe = config.probes.as_ref().map(Probe::new).transpose()?;

    let postgres = match config.postgres {
        Some(ref pg) => Some(Postgres::connect(pg).await?),
        None => None,
    };

    let result = match probe {
        Some(probe) => serve_probes(probe).await,
        None => {
            info!("no probes configured, waiting for shutdown signal");
            shutdown_signal().await;
            Ok(())
        }
    };

    if let Some(pg) = postgres {
        pg.close().await;
    }
    info!("service stopped");
    result
}

async fn serve_probes(probe: Probe) -> Result<()> {
    let bound = probe.bind().await?;
    bound.serve(shutdown_signal()).await?;
    Ok(())
}
