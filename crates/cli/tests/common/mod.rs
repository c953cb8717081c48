//! Shared test utilities for envyaml integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Write service documents into temporary directories.
//!
//! Invariants / Assumptions:
//! - All integration tests using this helper will be hermetic by default.
//! - Placeholder variables used by tests start with `_ENVYAML_TEST_` and are
//!   set per command, never on the test process.

use assert_cmd::Command;
use std::path::{Path, PathBuf};

/// Returns a hermetic `envyaml` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - `ENVYAML_CONFIG_PATH` and `RUST_LOG` are cleared so the host cannot
///   redirect the command.
pub fn envyaml_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("envyaml");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");

    // Clear potential host leakage
    cmd.env_remove("ENVYAML_CONFIG_PATH").env_remove("RUST_LOG");

    cmd
}

/// Write `content` to `service.yaml` inside `dir`.
pub fn write_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("service.yaml");
    std::fs::write(&path, content).unwrap();
    path
}

/// A document exercising every section and placeholder form.
#[allow(dead_code)]
pub const SERVICE_DOC: &str = "\
logger:
  app: billing
  level: ${_ENVYAML_TEST_LEVEL}
  origin: ${_ENVYAML_TEST_ORIGIN}
probes:
  probe_port: ${_ENVYAML_TEST_PROBE_PORT}
  wait_start_up_time: 0
  wait_liveness_time: 5
  wait_readiness_time: 10
postgres:
  conn: postgres://app:${_ENVYAML_TEST_DB_PASSWORD}@db:5432/app
";
