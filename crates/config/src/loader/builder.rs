//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` that locates and reads a config document.
//! - Optionally populate the process environment from a `.env` file first, so
//!   `${NAME}` placeholders can see its values.
//!
//! Does NOT handle:
//! - Placeholder substitution or typed conversion (done by `Env<T>` during decode).
//! - Direct environment variable parsing logic (delegated to env.rs).
//!
//! Invariants / Assumptions:
//! - A path set via `with_config_path` takes precedence over `ENVYAML_CONFIG_PATH`.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.
//! - `load()` either returns the whole document or an error; never a partial config.

use serde::de::DeserializeOwned;
use std::path::PathBuf;

use super::env::apply_env;
use super::error::ConfigError;
use crate::constants::DOTENV_DISABLED_ENV;
use crate::lookup::EnvLookup;
use crate::reader::{read_config, read_config_with};

/// Configuration loader that locates a YAML document and decodes it.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var(DOTENV_DISABLED_ENV).ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` environment variable is set to "true" or "1",
    /// the .env file will not be loaded (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `.env` file exists but has invalid syntax (`ConfigError::DotenvParse`)
    /// - The `.env` file exists but cannot be read due to I/O errors (`ConfigError::DotenvIo`)
    ///
    /// Missing `.env` files are silently ignored (returns `Ok(self)`).
    ///
    /// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "loaded .env file");
                Ok(self)
            }
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    /// Check if a dotenv error indicates the file was not found.
    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Set the config document path.
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    /// Read loader settings from environment variables.
    ///
    /// Only fills in what was not set through the builder.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    pub fn config_path(&self) -> Option<&PathBuf> {
        self.config_path.as_ref()
    }

    pub(crate) fn set_config_path(&mut self, path: Option<PathBuf>) {
        self.config_path = path;
    }

    fn require_path(&self) -> Result<&PathBuf, ConfigError> {
        self.config_path
            .as_ref()
            .ok_or(ConfigError::MissingConfigPath)
    }

    /// Read and decode the config document, resolving placeholders from the
    /// process environment.
    pub fn load<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        read_config(self.require_path()?)
    }

    /// Read and decode the config document, resolving placeholders from `env`.
    pub fn load_with<T, E>(&self, env: E) -> Result<T, ConfigError>
    where
        T: DeserializeOwned,
        E: EnvLookup + 'static,
    {
        read_config_with(self.require_path()?, env)
    }
}
