//! Environment variable names read by the loader.

/// Path of the config document when none is given explicitly.
pub const CONFIG_PATH_ENV: &str = "ENVYAML_CONFIG_PATH";

/// Set to `1` or `true` to skip `.env` loading.
pub const DOTENV_DISABLED_ENV: &str = "DOTENV_DISABLED";
