//! YAML document reading.
//!
//! Responsibilities:
//! - Validate a config path and decode the file into a caller-defined struct.
//! - Decode in-memory YAML documents.
//! - Optionally resolve `${NAME}` placeholders against an injected lookup.
//!
//! Does NOT handle:
//! - Locating the config file (see loader/builder.rs).
//! - Per-field substitution and conversion (done by `Env<T>` fields during decode).
//!
//! Invariants:
//! - Directories and missing paths are rejected before the file is opened.
//! - Any field failure fails the whole document; no partial config is returned.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::loader::ConfigError;
use crate::lookup::{EnvLookup, with_lookup};

/// Read the YAML file at `path` into `T`.
///
/// `Env<T>` fields resolve against the current thread's lookup (the process
/// environment unless [`with_lookup`] is in effect).
pub fn read_config<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ConfigError> {
    let path = path.as_ref();
    validate_path(path)?;

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ConfigFileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let config = serde_yaml::from_str(&content).map_err(|source| ConfigError::ConfigFileParse {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(config)
}

/// Read the YAML file at `path` into `T`, resolving placeholders from `env`.
pub fn read_config_with<T, E>(path: impl AsRef<Path>, env: E) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
    E: EnvLookup + 'static,
{
    with_lookup(env, || read_config(path))
}

/// Decode an in-memory YAML document into `T`.
pub fn from_yaml_str<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    Ok(serde_yaml::from_str(content)?)
}

/// Decode an in-memory YAML document into `T`, resolving placeholders from `env`.
pub fn from_yaml_str_with<T, E>(content: &str, env: E) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
    E: EnvLookup + 'static,
{
    with_lookup(env, || from_yaml_str(content))
}

fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let metadata = std::fs::metadata(path).map_err(|source| ConfigError::ConfigFileRead {
        path: path.to_path_buf(),
        source,
    })?;

    if metadata.is_dir() {
        return Err(ConfigError::PathIsDirectory {
            path: path.to_path_buf(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::MapEnv;
    use crate::value::Env;
    use serde::Deserialize;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[derive(Debug, Deserialize)]
    struct Jaeger {
        agent_host: Env<String>,
        agent_port: Env<i64>,
        service_name: Env<String>,
    }

    #[derive(Debug, Deserialize)]
    struct Document {
        jaeger: Jaeger,
        debug: Option<Env<bool>>,
    }

    const DOC: &str = "jaeger:\n  agent_host: ${JAEGER_HOST}\n  agent_port: ${JAEGER_PORT}\n  service_name: billing\n";

    fn write_doc(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_config_with_env() {
        let file = write_doc(DOC);
        let env = MapEnv::new()
            .with_var("JAEGER_HOST", "jaeger.local")
            .with_var("JAEGER_PORT", "6831");

        let doc: Document = read_config_with(file.path(), env).unwrap();
        assert_eq!(doc.jaeger.agent_host.value(), "jaeger.local");
        assert_eq!(*doc.jaeger.agent_port, 6831);
        assert_eq!(doc.jaeger.service_name.value(), "billing");
        assert!(doc.debug.is_none());
    }

    #[test]
    fn test_bad_field_fails_whole_document() {
        let file = write_doc(DOC);
        let env = MapEnv::new().with_var("JAEGER_HOST", "jaeger.local");

        let err = read_config_with::<Document, _>(file.path(), env).unwrap_err();
        match &err {
            ConfigError::ConfigFileParse { path, .. } => assert_eq!(path, file.path()),
            other => panic!("expected ConfigFileParse, got {other:?}"),
        }
        assert!(err.to_string().contains("not an integer"), "got: {err}");
    }

    #[test]
    fn test_directory_rejected() {
        let dir = TempDir::new().unwrap();
        let err = read_config::<Document>(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::PathIsDirectory { .. }));
    }

    #[test]
    fn test_missing_file_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.yaml");
        let err = read_config::<Document>(&path).unwrap_err();
        match err {
            ConfigError::ConfigFileRead { path: p, source } => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected ConfigFileRead, got {other:?}"),
        }
    }

    #[test]
    fn test_from_yaml_str_with_optional_field() {
        let env = MapEnv::new()
            .with_var("JAEGER_HOST", "h")
            .with_var("JAEGER_PORT", "1")
            .with_var("DEBUG", "TRUE");
        let content = format!("{DOC}debug: ${{DEBUG}}\n");
        let doc: Document = from_yaml_str_with(&content, env).unwrap();
        assert_eq!(doc.debug.map(Env::into_inner), Some(true));
    }

    #[test]
    fn test_from_yaml_str_syntax_error() {
        let err = from_yaml_str::<Document>("jaeger: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
