//! Service bootstrap from resolved config sections.
//!
//! Each module takes one section of a service document, decoded with
//! `envyaml_config::Env<T>` fields, and turns it into a running component:
//!
//! - [`logging`] - JSON logging with static service fields
//! - [`telemetry`] - OTLP span export next to the JSON logs
//! - [`probes`] - HTTP startup/liveness/readiness probes
//! - [`pg`] - a checked PostgreSQL pool

pub mod error;
pub mod logging;
pub mod pg;
pub mod probes;
pub mod telemetry;

pub use error::{BootstrapError, Result};
pub use logging::{LoggerConfig, init_logger, parse_level};
pub use pg::{Postgres, PostgresConfig};
pub use probes::{BoundProbe, Probe, ProbeConfig, ProbeKind};
pub use telemetry::{JaegerConfig, TracingConfig, TracingGuard, init_tracer};
