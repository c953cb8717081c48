//! Error types for configuration loading.
//!
//! Responsibilities:
//! - Define error variants for every way a document load can fail.
//! - Wrap typed conversion failures so one bad field fails the whole load.
//!
//! Does NOT handle:
//! - Conversion error details (see value/error.rs).
//!
//! Invariants:
//! - File errors carry the path that failed.
//! - Parse errors carry the serde_yaml error, which names the position and
//!   the conversion failure of the offending field.
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

use crate::value::ConversionError;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No config file given. Pass a path or set ENVYAML_CONFIG_PATH.")]
    MissingConfigPath,

    #[error("Failed to read config file at {path}: {source}")]
    ConfigFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config path {path} is a directory, not a YAML file")]
    PathIsDirectory { path: PathBuf },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigFileParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Failed to parse config document: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid value: {0}")]
    Conversion(#[from] ConversionError),

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    ///
    /// SAFETY: This error does not include any raw dotenv content.
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}
