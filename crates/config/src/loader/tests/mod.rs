//! Tests for the configuration loader builder.
//!
//! Responsibilities:
//! - Test locating and decoding config documents through the builder.
//! - Test environment variable handling and precedence.
//! - Test `.env` loading and its error reporting.
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Tests use `global_test_lock()` for additional synchronization.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Deserialize;

use crate::value::Env;


/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

#[derive(Debug, Deserialize)]
pub struct ProbeSection {
    pub probe_port: Env<i64>,
    pub wait_start_up_time: Env<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ServiceDocument {
    pub name: Env<String>,
    pub probes: ProbeSection,
}

/// Writes a config document into `dir` and returns its path.
pub fn create_test_config_file(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("config.yaml");
    std::fs::write(&path, content).expect("Failed to write test config");
    path
}

pub const SERVICE_DOC: &str = "\
name: ${_ENVYAML_SERVICE}-api
probes:
  probe_port: ${_ENVYAML_PROBE_PORT}
  wait_start_up_time: 5
";
