//! Conversion errors for typed scalar resolution.

use std::fmt;

use thiserror::Error;

/// Why a substituted scalar could not be converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionErrorKind {
    NotAnInteger,
    NotABoolean,
}

impl fmt::Display for ConversionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionErrorKind::NotAnInteger => f.write_str("not an integer"),
            ConversionErrorKind::NotABoolean => f.write_str("not a boolean"),
        }
    }
}

/// A substituted scalar that does not parse as the requested type.
///
/// Carries the substituted value so the load error names what was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {value:?}")]
pub struct ConversionError {
    kind: ConversionErrorKind,
    value: String,
}

impl ConversionError {
    pub fn new(kind: ConversionErrorKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    pub fn kind(&self) -> ConversionErrorKind {
        self.kind
    }

    /// The substituted string that failed to convert.
    pub fn value(&self) -> &str {
        &self.value
    }
}
