//! Kubernetes-style startup, liveness and readiness probes.
//!
//! Provides:
//! - `/startupProbe` - 200 once the startup wait has elapsed, 503 before
//! - `/livenessProbe` - 200 once the liveness wait has elapsed, 503 before
//! - `/readinessProbe` - 200 once the readiness wait has elapsed, 503 before
//!
//! Waits are measured from the moment the server starts serving.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{Router, extract::State, http::StatusCode, routing::get};
use envyaml_config::Env;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

use crate::error::{BootstrapError, Result};

/// The `probes` section of a service document. Waits are in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProbeConfig {
    pub probe_port: Env<i64>,
    pub wait_start_up_time: Env<i64>,
    pub wait_liveness_time: Env<i64>,
    pub wait_readiness_time: Env<i64>,
}

/// Which probe an endpoint answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeKind {
    Startup,
    Liveness,
    Readiness,
}

impl ProbeKind {
    pub const ALL: [ProbeKind; 3] = [ProbeKind::Startup, ProbeKind::Liveness, ProbeKind::Readiness];

    pub fn path(self) -> &'static str {
        match self {
            ProbeKind::Startup => "/startupProbe",
            ProbeKind::Liveness => "/livenessProbe",
            ProbeKind::Readiness => "/readinessProbe",
        }
    }
}

/// Validated probe settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
    port: u16,
    startup_wait: Duration,
    liveness_wait: Duration,
    readiness_wait: Duration,
}

impl Probe {
    /// Validate a resolved `probes` section.
    ///
    /// Port 0 asks the OS for an ephemeral port.
    pub fn new(config: &ProbeConfig) -> Result<Self> {
        let port = u16::try_from(*config.probe_port).map_err(|_| {
            BootstrapError::invalid(
                "probes.probe_port",
                format!("{} is not a TCP port", config.probe_port),
            )
        })?;

        Ok(Self {
            port,
            startup_wait: wait_secs("probes.wait_start_up_time", &config.wait_start_up_time)?,
            liveness_wait: wait_secs("probes.wait_liveness_time", &config.wait_liveness_time)?,
            readiness_wait: wait_secs("probes.wait_readiness_time", &config.wait_readiness_time)?,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn wait(&self, kind: ProbeKind) -> Duration {
        match kind {
            ProbeKind::Startup => self.startup_wait,
            ProbeKind::Liveness => self.liveness_wait,
            ProbeKind::Readiness => self.readiness_wait,
        }
    }

    /// Whether `kind` reports healthy after `elapsed` of serving.
    pub fn is_passing(&self, kind: ProbeKind, elapsed: Duration) -> bool {
        elapsed > self.wait(kind)
    }

    /// Create the probe router, measuring waits from `started_at`.
    pub fn router(&self, started_at: Instant) -> Router {
        let state = ProbeState {
            probe: Arc::new(self.clone()),
            started_at,
        };

        Router::new()
            .route(ProbeKind::Startup.path(), get(startup_handler))
            .route(ProbeKind::Liveness.path(), get(liveness_handler))
            .route(ProbeKind::Readiness.path(), get(readiness_handler))
            .with_state(state)
    }

    /// Bind the probe port on all interfaces.
    pub async fn bind(self) -> Result<BoundProbe> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| BootstrapError::Bind { addr, source })?;

        Ok(BoundProbe {
            probe: self,
            listener,
        })
    }
}

fn wait_secs(field: &'static str, value: &Env<i64>) -> Result<Duration> {
    u64::try_from(**value)
        .map(Duration::from_secs)
        .map_err(|_| BootstrapError::invalid(field, format!("{value} is negative")))
}

/// A probe server whose port is bound but not yet serving.
#[derive(Debug)]
pub struct BoundProbe {
    probe: Probe,
    listener: TcpListener,
}

impl BoundProbe {
    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener.local_addr().map_err(BootstrapError::Serve)
    }

    /// Serve the probes until `shutdown` completes.
    pub async fn serve<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = self.probe.router(Instant::now());

        tracing::info!(addr = %self.local_addr()?, "probe server listening");

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(BootstrapError::Serve)
    }
}

#[derive(Clone)]
struct ProbeState {
    probe: Arc<Probe>,
    started_at: Instant,
}

impl ProbeState {
    fn status(&self, kind: ProbeKind) -> StatusCode {
        if self.probe.is_passing(kind, self.started_at.elapsed()) {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

async fn startup_handler(State(state): State<ProbeState>) -> StatusCode {
    state.status(ProbeKind::Startup)
}

async fn liveness_handler(State(state): State<ProbeState>) -> StatusCode {
    state.status(ProbeKind::Liveness)
}

async fn readiness_handler(State(state): State<ProbeState>) -> StatusCode {
    state.status(ProbeKind::Readiness)
}
