//! Environment variable lookup used by placeholder substitution.
//!
//! Responsibilities:
//! - Define the `EnvLookup` capability consumed by the substitutor.
//! - Provide the process-environment implementation and an in-memory fake.
//! - Allow a lookup to be scoped to the current thread while a document decodes.
//!
//! Does NOT handle:
//! - Placeholder parsing (see placeholder.rs).
//! - Trimming or filtering of values (see loader/env.rs for the loader's helper).
//!
//! Invariants:
//! - Lookups are read-only; nothing in this crate writes the process environment.
//! - A scoped lookup is visible only on the thread that installed it and is
//!   restored when the closure returns or unwinds.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Key-value access to environment variables.
pub trait EnvLookup {
    /// Returns the value of `name`, or `None` when it is not set.
    fn lookup(&self, name: &str) -> Option<String>;
}

impl<F> EnvLookup for F
where
    F: Fn(&str) -> Option<String>,
{
    fn lookup(&self, name: &str) -> Option<String> {
        self(name)
    }
}

/// The real process environment.
///
/// Values that are not valid UTF-8 are reported as unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn lookup(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// An in-memory environment, mostly for tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnv {
    vars: BTreeMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to add a variable.
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.vars.remove(name)
    }
}

impl EnvLookup for MapEnv {
    fn lookup(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

impl<K, V> FromIterator<(K, V)> for MapEnv
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

thread_local! {
    static SCOPED: RefCell<Option<Rc<dyn EnvLookup>>> = const { RefCell::new(None) };
}

/// The lookup in effect on the current thread.
///
/// Resolves against the lookup installed by [`with_lookup`] if there is one,
/// otherwise against [`ProcessEnv`]. This is what `Env<T>` deserialization uses.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentEnv;

impl EnvLookup for CurrentEnv {
    fn lookup(&self, name: &str) -> Option<String> {
        let scoped = SCOPED.with(|slot| slot.borrow().clone());
        match scoped {
            Some(env) => env.lookup(name),
            None => ProcessEnv.lookup(name),
        }
    }
}

/// Run `f` with `env` as the current thread's lookup.
///
/// Nested calls shadow the outer lookup for their duration.
///
/// ```
/// use envyaml_config::{CurrentEnv, EnvLookup, MapEnv, with_lookup};
///
/// let env = MapEnv::new().with_var("DB_HOST", "db.internal");
/// let host = with_lookup(env, || CurrentEnv.lookup("DB_HOST"));
/// assert_eq!(host.as_deref(), Some("db.internal"));
/// ```
pub fn with_lookup<E, R>(env: E, f: impl FnOnce() -> R) -> R
where
    E: EnvLookup + 'static,
{
    let previous = SCOPED.with(|slot| slot.replace(Some(Rc::new(env))));
    let _restore = RestoreScope(previous);
    f()
}

struct RestoreScope(Option<Rc<dyn EnvLookup>>);

impl Drop for RestoreScope {
    fn drop(&mut self) {
        let previous = self.0.take();
        SCOPED.with(|slot| *slot.borrow_mut() = previous);
    }
}
