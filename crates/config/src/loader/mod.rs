//! Configuration loader for config documents.
//!
//! Responsibilities:
//! - Locate the config document (builder value or `ENVYAML_CONFIG_PATH`).
//! - Load `.env` files into the process environment before decoding.
//! - Decode the document into a caller-defined struct of `Env<T>` fields.
//!
//! Does NOT handle:
//! - The substitution and conversion rules themselves (see `placeholder` and `value`).
//!
//! Invariants / Assumptions:
//! - Builder values take precedence over environment variables.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

mod builder;
mod env;
mod error;

pub use builder::ConfigLoader;
pub use env::env_var_or_none;
pub use error::ConfigError;

#[cfg(test)]
mod tests;
