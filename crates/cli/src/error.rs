//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to tell a broken config
//!   document apart from a runtime failure.
//! - Map `ConfigError` and `BootstrapError` variants to exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Anything the operator fixes by editing the document or the environment
//!   exits with 2.

use envyaml_bootstrap::BootstrapError;
use envyaml_config::ConfigError;

/// Structured exit codes for envyaml.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - I/O, network or other runtime failure.
    GeneralError = 1,

    /// Config error - the document or a placeholder value is invalid.
    ///
    /// Scripts should fix the input and not retry.
    ConfigError = 2,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(_: &ConfigError) -> Self {
        ExitCode::ConfigError
    }
}

impl From<&BootstrapError> for ExitCode {
    fn from(err: &BootstrapError) -> Self {
        match err {
            BootstrapError::InvalidConfig { .. } | BootstrapError::InvalidConnectionString(_) => {
                ExitCode::ConfigError
            }
            BootstrapError::SubscriberInit(_)
            | BootstrapError::TracerInit(_)
            | BootstrapError::Bind { .. }
            | BootstrapError::Serve(_)
            | BootstrapError::ConnectionCheck(_) => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if no known error is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
                return ExitCode::from(config_err);
            }
            if let Some(bootstrap_err) = cause.downcast_ref::<BootstrapError>() {
                return ExitCode::from(bootstrap_err);
            }
        }

        ExitCode::GeneralError
    }
}
