//! OpenTelemetry span export from a resolved `jaeger` section.
//!
//! This module turns the `jaeger` section of a service document into an OTLP
//! tracer provider and installs it next to the JSON logging layer, so spans
//! opened with `tracing` are exported and still logged locally.
//!
//! # Usage
//!
//! ```rust,ignore
//! use envyaml_bootstrap::telemetry::init_tracer;
//!
//! let guard = init_tracer(&config.jaeger, &config.logger)?;
//! // Run application...
//! guard.shutdown(); // Flush spans before exit
//! ```

use envyaml_config::Env;
use opentelemetry::trace::TracerProvider;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::SdkTracerProvider;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::Span;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{BootstrapError, Result};
use crate::logging::{self, LoggerConfig};

/// The `jaeger` section of a service document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct JaegerConfig {
    pub agent_host: Env<String>,
    pub agent_port: Env<i64>,
    pub service_name: Env<String>,
}

impl JaegerConfig {
    /// The collector endpoint, `http://{agent_host}:{agent_port}`.
    ///
    /// # Errors
    /// Returns `BootstrapError::InvalidConfig` for an empty host or a port
    /// outside `1..=65535`.
    pub fn endpoint(&self) -> Result<String> {
        let host = self.agent_host.value().trim();
        if host.is_empty() {
            return Err(BootstrapError::invalid("jaeger.agent_host", "must not be empty"));
        }

        let port = *self.agent_port;
        if !(1..=i64::from(u16::MAX)).contains(&port) {
            return Err(BootstrapError::invalid(
                "jaeger.agent_port",
                format!("{port} is not a TCP port"),
            ));
        }

        Ok(format!("http://{host}:{port}"))
    }
}

/// Configuration for OpenTelemetry tracing.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// OTLP endpoint (e.g., "http://localhost:4317" for Jaeger/Tempo)
    pub otlp_endpoint: Option<String>,
    /// Service name for trace attribution
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Export timeout
    pub timeout: Duration,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            otlp_endpoint: None,
            service_name: "envyaml".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            timeout: Duration::from_secs(5),
        }
    }
}

impl TracingConfig {
    /// Create a new config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a config that exports to the collector named by `jaeger`.
    pub fn from_jaeger(jaeger: &JaegerConfig) -> Result<Self> {
        Ok(Self::new()
            .with_otlp_endpoint(jaeger.endpoint()?)
            .with_service_name(jaeger.service_name.value().clone()))
    }

    /// Builder method to set OTLP endpoint.
    pub fn with_otlp_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.otlp_endpoint = Some(endpoint.into());
        self
    }

    /// Builder method to set service name.
    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }

    /// Install the global subscriber with the OpenTelemetry layer.
    ///
    /// Level and static fields come from `logger`, as with
    /// [`logging::init_logger`].
    ///
    /// # Returns
    /// A guard that must be held until application shutdown to ensure
    /// all spans are flushed.
    ///
    /// # Errors
    /// Returns an error if the OTLP pipeline fails to initialize or a global
    /// subscriber is already installed.
    pub fn init(&self, logger: &LoggerConfig) -> Result<TracingGuard> {
        let (level, unknown) = logging::resolve_level(logger);

        let provider = match self.otlp_endpoint {
            Some(ref endpoint) => Some(self.create_tracer_provider(endpoint)?),
            None => None,
        };

        let otel_layer = provider.as_ref().map(|provider| {
            tracing_opentelemetry::layer().with_tracer(provider.tracer(self.service_name.clone()))
        });

        tracing_subscriber::registry()
            .with(logging::env_filter(level))
            .with(otel_layer)
            .with(logging::json_layer(std::io::stdout))
            .try_init()
            .map_err(|e| BootstrapError::SubscriberInit(e.to_string()))?;

        if let Some(ref provider) = provider {
            opentelemetry::global::set_text_map_propagator(TraceContextPropagator::new());
            opentelemetry::global::set_tracer_provider(provider.clone());
        }

        logging::report_unknown_level(unknown);
        tracing::info!(
            endpoint = self.otlp_endpoint.as_deref().unwrap_or("none"),
            service = %self.service_name,
            "tracer initialized"
        );

        Ok(TracingGuard {
            provider,
            span: logging::service_span(logger),
        })
    }

    fn create_tracer_provider(&self, endpoint: &str) -> Result<SdkTracerProvider> {
        use opentelemetry_otlp::{Protocol, WithExportConfig};
        use opentelemetry_sdk::trace::{BatchConfig, BatchSpanProcessor, Sampler};

        let otlp_exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint)
            .with_timeout(self.timeout)
            .with_protocol(Protocol::Grpc)
            .build()
            .map_err(|e| BootstrapError::TracerInit(e.to_string()))?;

        let batch_processor = BatchSpanProcessor::builder(otlp_exporter)
            .with_batch_config(BatchConfig::default())
            .build();

        let resource = opentelemetry_sdk::Resource::builder()
            .with_attributes(vec![
                opentelemetry::KeyValue::new("service.name", self.service_name.clone()),
                opentelemetry::KeyValue::new("service.version", self.service_version.clone()),
                opentelemetry::KeyValue::new("telemetry.sdk.name", "opentelemetry-rust"),
                opentelemetry::KeyValue::new("telemetry.sdk.language", "rust"),
            ])
            .build();

        // Every span is sampled.
        let provider = SdkTracerProvider::builder()
            .with_span_processor(batch_processor)
            .with_resource(resource)
            .with_sampler(Sampler::AlwaysOn)
            .build();

        Ok(provider)
    }
}

/// Install logging plus span export for a service.
///
/// Shorthand for `TracingConfig::from_jaeger(jaeger)?.init(logger)`.
pub fn init_tracer(jaeger: &JaegerConfig, logger: &LoggerConfig) -> Result<TracingGuard> {
    TracingConfig::from_jaeger(jaeger)?.init(logger)
}

/// Guard that holds tracer resources.
///
/// Must be kept alive until application shutdown to ensure all
/// pending spans are exported.
pub struct TracingGuard {
    provider: Option<SdkTracerProvider>,
    span: Span,
}

impl TracingGuard {
    /// The service span carrying the logger section's static fields.
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Shutdown the tracer and flush any pending spans.
    ///
    /// This should be called before application exit to ensure all
    /// spans are exported.
    pub fn shutdown(&self) {
        if let Some(ref provider) = self.provider
            && let Err(e) = provider.shutdown()
        {
            tracing::warn!(error = %e, "tracer shutdown failed");
        }
    }
}
