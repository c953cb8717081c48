//! Environment variable handling for the loader itself.
//!
//! Responsibilities:
//! - Read the loader's own settings (config path) from the environment.
//! - Provide a helper for reading env vars with empty/whitespace filtering.
//!
//! Does NOT handle:
//! - `${NAME}` substitution inside documents (see placeholder.rs), which keeps
//!   values untrimmed and treats empty as empty.
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - A config path set explicitly on the loader is never replaced.

use std::path::PathBuf;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::constants::CONFIG_PATH_ENV;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            // No trimming needed, return original to avoid allocation
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if loader.config_path().is_none()
        && let Some(path) = env_var_or_none(CONFIG_PATH_ENV)
    {
        loader.set_config_path(Some(PathBuf::from(path)));
    }
    Ok(())
}
