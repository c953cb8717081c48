//! Environment-overridable typed configuration.
//!
//! Config documents are plain YAML whose scalar fields may reference
//! environment variables as `${NAME}`. Fields declared as [`Env<T>`] are
//! substituted and converted to `T` (text, integer or boolean) while the
//! document is decoded; a field that fails to convert fails the whole load.
//!
//! ```
//! use envyaml_config::{Env, MapEnv, from_yaml_str_with};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Postgres {
//!     conn: Env<String>,
//!     max_connections: Env<i64>,
//! }
//!
//! let env = MapEnv::new().with_var("DB_HOST", "db.internal");
//! let pg: Postgres = from_yaml_str_with(
//!     "conn: postgres://${DB_HOST}:5432/app\nmax_connections: 10\n",
//!     env,
//! )
//! .unwrap();
//! assert_eq!(pg.conn.value(), "postgres://db.internal:5432/app");
//! assert_eq!(*pg.max_connections, 10);
//! ```

pub mod constants;
mod loader;
mod lookup;
pub mod placeholder;
mod reader;
pub mod value;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use lookup::{CurrentEnv, EnvLookup, MapEnv, ProcessEnv, with_lookup};
pub use placeholder::{substitute, substitute_with};
pub use reader::{from_yaml_str, from_yaml_str_with, read_config, read_config_with};
pub use value::{ConversionError, ConversionErrorKind, Env, EnvScalar, ScalarKind, resolve};
