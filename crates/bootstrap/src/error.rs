//! Error types for service bootstrap.

use std::net::SocketAddr;
use thiserror::Error;

/// Errors that can occur while turning resolved config sections into
/// running components.
#[derive(Error, Debug)]
pub enum BootstrapError {
    /// A resolved value is outside the range its consumer accepts.
    #[error("Invalid {field}: {message}")]
    InvalidConfig {
        field: &'static str,
        message: String,
    },

    /// A global subscriber was already installed for this process.
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),

    /// The OTLP export pipeline could not be built.
    #[error("Failed to initialize OpenTelemetry: {0}")]
    TracerInit(String),

    /// The probe listener could not bind its port.
    #[error("Failed to bind probe server on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The probe server stopped with an I/O error.
    #[error("Probe server error: {0}")]
    Serve(#[source] std::io::Error),

    /// The Postgres connection string could not be parsed.
    #[error("Unable to parse connection config: {0}")]
    InvalidConnectionString(String),

    /// The pool was built but no connection could be acquired.
    #[error("Database connection check failed: {0}")]
    ConnectionCheck(#[source] sqlx::Error),
}

impl BootstrapError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            message: message.into(),
        }
    }
}

/// Result type alias for bootstrap operations.
pub type Result<T> = std::result::Result<T, BootstrapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_display() {
        let err = BootstrapError::invalid("probe_port", "70000 is not a TCP port");
        assert_eq!(err.to_string(), "Invalid probe_port: 70000 is not a TCP port");
    }
}
