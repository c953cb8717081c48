//! Environment-overridable configuration values.
//!
//! Responsibilities:
//! - Define `Env<T>`, a document field whose raw scalar may reference
//!   environment variables and which resolves to a typed value on load.
//! - Decode `Env<T>` from any serde document format that can hand out a scalar.
//!
//! Does NOT handle:
//! - Reading documents from disk (see reader.rs).
//! - Cross-field validation (left to the consuming config structs).
//!
//! Invariants:
//! - An `Env<T>` only exists once resolution has succeeded; there is no
//!   unresolved state.
//! - The raw scalar is not retained after resolution.
//! - A conversion failure is a decode error for the enclosing document.
//! - A null scalar (`~`, `null`, or no value) and a missing field both resolve
//!   as the empty string.

mod error;
mod scalar;

use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::lookup::{CurrentEnv, EnvLookup};
use crate::placeholder::substitute_with;

pub use error::{ConversionError, ConversionErrorKind};
pub use scalar::{EnvScalar, ScalarKind, resolve};

/// A configuration value that may be overridden by environment variables.
///
/// The document holds a scalar such as `${DB_PORT}` or `postgres://${DB_HOST}/app`;
/// on decode every `${NAME}` is replaced from the environment and the result is
/// converted to `T`.
///
/// ```
/// use envyaml_config::{Env, MapEnv};
///
/// let env = MapEnv::new().with_var("FOO", "world");
/// let greeting = Env::<String>::resolve_with("hello ${FOO}", &env).unwrap();
/// assert_eq!(greeting.value(), "hello world");
///
/// let port = Env::<i64>::resolve_with("${PORT}", &MapEnv::new());
/// assert!(port.is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Env<T> {
    value: T,
}

impl<T: EnvScalar> Env<T> {
    /// Wrap an already-typed value, e.g. a programmatic default.
    pub fn new(value: T) -> Self {
        Self { value }
    }

    /// Resolve a raw scalar against the current thread's lookup.
    pub fn resolve(raw: &str) -> Result<Self, ConversionError> {
        Self::resolve_with(raw, &CurrentEnv)
    }

    /// Resolve a raw scalar against `env`.
    pub fn resolve_with<E>(raw: &str, env: &E) -> Result<Self, ConversionError>
    where
        E: EnvLookup + ?Sized,
    {
        let substituted = substitute_with(raw, env);
        resolve::<T>(&substituted).map(Self::new)
    }

    pub fn kind(&self) -> ScalarKind {
        T::KIND
    }
}

impl<T> Env<T> {
    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> Deref for Env<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> AsRef<T> for Env<T> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}

impl<T: EnvScalar> From<T> for Env<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: fmt::Display> fmt::Display for Env<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

impl<T: Serialize> Serialize for Env<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

impl<'de, T: EnvScalar> Deserialize<'de> for Env<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_option(NullableVisitor(PhantomData))
    }
}

struct NullableVisitor<T>(PhantomData<T>);

impl<'de, T: EnvScalar> Visitor<'de> for NullableVisitor<T> {
    type Value = Env<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a scalar resolving to {}", T::KIND)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        EnvVisitor::<T>::finish("")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        EnvVisitor::<T>::finish("")
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        // Ask for a string so YAML hands over the literal text of bare numbers
        // and booleans instead of re-typing them.
        deserializer.deserialize_str(EnvVisitor(PhantomData))
    }
}

struct EnvVisitor<T>(PhantomData<T>);

impl<T: EnvScalar> EnvVisitor<T> {
    fn finish<E: de::Error>(raw: &str) -> Result<Env<T>, E> {
        Env::resolve(raw).map_err(E::custom)
    }
}

impl<T: EnvScalar> Visitor<'_> for EnvVisitor<T> {
    type Value = Env<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a scalar resolving to {}", T::KIND)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Self::finish(v)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Self::finish(&v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Self::finish(&v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Self::finish(&v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Self::finish(&v.to_string())
    }
}
