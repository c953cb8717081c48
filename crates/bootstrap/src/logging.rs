//! Structured JSON logging from a resolved `logger` section.
//!
//! Responsibilities:
//! - Define `LoggerConfig`, the `logger` section of a service document.
//! - Map the configured level name onto a `tracing` level filter.
//! - Install the process-wide subscriber and hand back the service span that
//!   carries the static fields (`app_tag`, `origin`, `facility`, ...).
//!
//! Does NOT handle:
//! - Span export (see telemetry.rs, which reuses the JSON layer built here).
//!
//! Invariants:
//! - An unknown level never aborts startup; it falls back to `trace` and the
//!   fallback is reported once the subscriber is live.
//! - `RUST_LOG`, when set, overrides the configured level.

use std::str::FromStr;

use envyaml_config::Env;
use serde::{Deserialize, Serialize};
use tracing::Span;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{BootstrapError, Result};

/// The `logger` section of a service document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggerConfig {
    /// Application name, emitted as `app_tag` on every event.
    pub app: Env<String>,
    /// Level name: `trace`, `debug`, `info`, `warn`, `error`, `fatal`,
    /// `panic` or `disabled`.
    #[serde(default)]
    pub level: Env<String>,
    #[serde(default)]
    pub facility: Env<String>,
    #[serde(default)]
    pub ci_commit_ref_name: Env<String>,
    #[serde(default)]
    pub origin: Env<String>,
}

/// Parse a level name, ASCII case-insensitive.
///
/// An empty name (no `level` configured) selects `info`.
pub fn parse_level(level: &str) -> Result<LevelFilter> {
    match level.trim().to_ascii_lowercase().as_str() {
        "" => Ok(LevelFilter::INFO),
        "fatal" | "panic" => Ok(LevelFilter::ERROR),
        "disabled" => Ok(LevelFilter::OFF),
        other => LevelFilter::from_str(other).map_err(|_| {
            BootstrapError::invalid("logger.level", format!("unknown level {other:?}"))
        }),
    }
}

/// Install the global JSON subscriber for `config`.
///
/// Returns the service span; enter it (or instrument the main future with it)
/// so every event carries the section's static fields.
///
/// # Errors
///
/// Returns `BootstrapError::SubscriberInit` if a global subscriber is already
/// installed.
pub fn init_logger(config: &LoggerConfig) -> Result<Span> {
    let (level, unknown) = resolve_level(config);

    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(json_layer(std::io::stdout))
        .try_init()
        .map_err(|e| BootstrapError::SubscriberInit(e.to_string()))?;

    report_unknown_level(unknown);
    Ok(service_span(config))
}

/// The span holding the static logger fields.
///
/// Created at error level so it stays enabled under any filter that lets
/// events through.
pub fn service_span(config: &LoggerConfig) -> Span {
    tracing::error_span!(
        "service",
        app_tag = %config.app,
        origin = %config.origin,
        facility = %config.facility,
        ci_commit_ref_name = %config.ci_commit_ref_name,
        version = env!("CARGO_PKG_VERSION"),
    )
}

pub(crate) fn resolve_level(config: &LoggerConfig) -> (LevelFilter, Option<BootstrapError>) {
    match parse_level(config.level.value()) {
        Ok(level) => (level, None),
        Err(e) => (LevelFilter::TRACE, Some(e)),
    }
}

pub(crate) fn report_unknown_level(unknown: Option<BootstrapError>) {
    if let Some(err) = unknown {
        tracing::error!(error = %err, "falling back to trace level");
    }
}

pub(crate) fn env_filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
}

pub(crate) fn json_layer<S, W>(writer: W) -> impl Layer<S>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(false)
        .with_writer(writer)
}
