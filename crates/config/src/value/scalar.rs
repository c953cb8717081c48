//! Typed conversion of substituted scalars.
//!
//! Responsibilities:
//! - Define the closed set of scalar kinds a field may declare.
//! - Convert a substituted string into the declared Rust type.
//!
//! Does NOT handle:
//! - Placeholder substitution (see placeholder.rs).
//! - Locating the failing field in a document (serde_yaml reports the position).
//!
//! Invariants:
//! - Conversion is a pure function of the input string.
//! - Integers are base 10 with an optional leading `-`; `+`, whitespace and
//!   underscores are rejected, as is overflow of the target width.
//! - Booleans accept `1`, `t`, `T`, `true`, `True`, `TRUE` and the matching
//!   false spellings; mixed case such as `tRuE` is rejected.
//! - Text conversion never fails.

use std::fmt;

use super::error::{ConversionError, ConversionErrorKind};

/// The kind of scalar a field resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Text,
    Integer,
    Boolean,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarKind::Text => f.write_str("text"),
            ScalarKind::Integer => f.write_str("integer"),
            ScalarKind::Boolean => f.write_str("boolean"),
        }
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for String {}
    impl Sealed for i64 {}
    impl Sealed for i32 {}
    impl Sealed for bool {}
}

/// A Rust type an environment-overridable field may resolve to.
///
/// Implemented for `String` (text), `i64` and `i32` (integer) and `bool`
/// (boolean). The trait is sealed so the kind set stays closed.
pub trait EnvScalar: sealed::Sealed + Sized {
    const KIND: ScalarKind;

    /// Convert an already-substituted string.
    fn convert(substituted: &str) -> Result<Self, ConversionError>;
}

impl EnvScalar for String {
    const KIND: ScalarKind = ScalarKind::Text;

    fn convert(substituted: &str) -> Result<Self, ConversionError> {
        Ok(substituted.to_string())
    }
}

macro_rules! integer_scalar {
    ($($ty:ty),*) => {$(
        impl EnvScalar for $ty {
            const KIND: ScalarKind = ScalarKind::Integer;

            fn convert(substituted: &str) -> Result<Self, ConversionError> {
                // `str::parse` tolerates a leading `+`; whole-number syntax here does not.
                if substituted.starts_with('+') {
                    return Err(ConversionError::new(
                        ConversionErrorKind::NotAnInteger,
                        substituted,
                    ));
                }
                substituted.parse::<$ty>().map_err(|_| {
                    ConversionError::new(ConversionErrorKind::NotAnInteger, substituted)
                })
            }
        }
    )*};
}

integer_scalar!(i64, i32);

impl EnvScalar for bool {
    const KIND: ScalarKind = ScalarKind::Boolean;

    fn convert(substituted: &str) -> Result<Self, ConversionError> {
        match substituted {
            "1" | "t" | "T" | "true" | "True" | "TRUE" => Ok(true),
            "0" | "f" | "F" | "false" | "False" | "FALSE" => Ok(false),
            _ => Err(ConversionError::new(
                ConversionErrorKind::NotABoolean,
                substituted,
            )),
        }
    }
}

/// Convert a substituted string to `T`.
///
/// ```
/// use envyaml_config::{ConversionErrorKind, resolve};
///
/// assert_eq!(resolve::<i64>("42").unwrap(), 42);
/// assert_eq!(resolve::<bool>("1").unwrap(), true);
/// assert_eq!(
///     resolve::<i64>("4x2").unwrap_err().kind(),
///     ConversionErrorKind::NotAnInteger
/// );
/// ```
pub fn resolve<T: EnvScalar>(substituted: &str) -> Result<T, ConversionError> {
    T::convert(substituted)
}
