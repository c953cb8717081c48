//! `${NAME}` placeholder substitution.
//!
//! Responsibilities:
//! - Find `${NAME}` references in a raw scalar.
//! - Replace each reference with the value of the named environment variable.
//!
//! Does NOT handle:
//! - Type conversion of the result (see value/scalar.rs).
//! - Escaping: there is no syntax for a literal `${NAME}`.
//!
//! Invariants:
//! - `NAME` is one or more characters other than `{` and `}`.
//! - Matches are found left to right and never overlap.
//! - Unset and empty variables both substitute the empty string; this is not an error.
//! - Substituted values are never re-scanned.
//! - Input without `${` is returned borrowed and unchanged.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::lookup::{CurrentEnv, EnvLookup};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^{}]+)\}").expect("placeholder pattern is valid"));

/// Returns true if `raw` contains at least one `${NAME}` reference.
pub fn has_placeholder(raw: &str) -> bool {
    raw.contains("${") && PLACEHOLDER.is_match(raw)
}

/// Names referenced by `raw`, in order of appearance.
pub fn placeholders(raw: &str) -> impl Iterator<Item = &str> {
    PLACEHOLDER
        .captures_iter(raw)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
}

/// Substitute placeholders from the current thread's lookup.
///
/// See [`crate::with_lookup`]; without a scoped lookup this reads the process
/// environment.
pub fn substitute(raw: &str) -> Cow<'_, str> {
    substitute_with(raw, &CurrentEnv)
}

/// Substitute placeholders from `env`.
///
/// ```
/// use envyaml_config::{MapEnv, substitute_with};
///
/// let env = MapEnv::new().with_var("A", "host").with_var("B", "5432");
/// assert_eq!(substitute_with("${A}:${B}", &env), "host:5432");
/// assert_eq!(substitute_with("${MISSING}x", &env), "x");
/// ```
pub fn substitute_with<'a, E>(raw: &'a str, env: &E) -> Cow<'a, str>
where
    E: EnvLookup + ?Sized,
{
    if !raw.contains("${") {
        return Cow::Borrowed(raw);
    }

    PLACEHOLDER.replace_all(raw, |caps: &Captures<'_>| {
        let name = &caps[1];
        match env.lookup(name) {
            Some(value) if !value.is_empty() => value,
            _ => {
                tracing::debug!(variable = name, "placeholder variable unset or empty");
                String::new()
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::MapEnv;
    use proptest::prelude::*;
    use serial_test::serial;

    fn env() -> MapEnv {
        MapEnv::new()
            .with_var("A", "host")
            .with_var("B", "5432")
            .with_var("EMPTY", "")
            .with_var("NESTED", "${A}")
    }

    #[test]
    fn test_no_placeholder_is_borrowed() {
        let out = substitute_with("plain value", &env());
        assert!(matches!(out, Cow::Borrowed("plain value")));
    }

    #[test]
    fn test_single_placeholder() {
        assert_eq!(substitute_with("hello ${A}!", &env()), "hello host!");
    }

    #[test]
    fn test_multiple_placeholders() {
        assert_eq!(substitute_with("${A}:${B}", &env()), "host:5432");
        assert_eq!(substitute_with("${A}${A}", &env()), "hosthost");
    }

    #[test]
    fn test_unset_and_empty_resolve_to_empty() {
        assert_eq!(substitute_with("x${MISSING}y", &env()), "xy");
        assert_eq!(substitute_with("x${EMPTY}y", &env()), "xy");
        assert_eq!(substitute_with("${MISSING}", &env()), "");
    }

    #[test]
    fn test_malformed_references_stay_literal() {
        assert_eq!(substitute_with("${}", &env()), "${}");
        assert_eq!(substitute_with("${A", &env()), "${A");
        assert_eq!(substitute_with("$A", &env()), "$A");
        assert_eq!(substitute_with("${{A}}", &env()), "${{A}}");
    }

    #[test]
    fn test_brace_in_name_matches_innermost() {
        // `${x${A}` contains a `{` inside the first candidate, so only `${A}` matches.
        assert_eq!(substitute_with("${x${A}", &env()), "${xhost");
    }

    #[test]
    fn test_substituted_values_are_not_rescanned() {
        assert_eq!(substitute_with("${NESTED}", &env()), "${A}");
    }

    #[test]
    fn test_placeholder_names_in_order() {
        let names: Vec<&str> = placeholders("${B} and ${A} and ${B}").collect();
        assert_eq!(names, vec!["B", "A", "B"]);
        assert!(has_placeholder("x ${Y}"));
        assert!(!has_placeholder("x ${}"));
        assert!(!has_placeholder("x"));
    }

    #[test]
    #[serial]
    fn test_substitute_rereads_process_env() {
        temp_env::with_var("_ENVYAML_REREAD", Some("first"), || {
            assert_eq!(substitute("${_ENVYAML_REREAD}"), "first");
        });
        temp_env::with_var("_ENVYAML_REREAD", Some("second"), || {
            assert_eq!(substitute("${_ENVYAML_REREAD}"), "second");
        });
        temp_env::with_var_unset("_ENVYAML_REREAD", || {
            assert_eq!(substitute("${_ENVYAML_REREAD}"), "");
        });
    }

    proptest! {
        #[test]
        fn prop_strings_without_marker_are_unchanged(s in "[^$]*|[a-z$ {}]*") {
            prop_assume!(!s.contains("${"));
            let env = env();
            let out = substitute_with(&s, &env);
            prop_assert_eq!(out.as_ref(), s.as_str());
        }

        #[test]
        fn prop_single_reference_replaced_in_place(
            prefix in "[a-z :/@]{0,12}",
            suffix in "[a-z :/@]{0,12}",
            value in "[A-Za-z0-9._-]{1,16}",
        ) {
            let env = MapEnv::new().with_var("TARGET", value.clone());
            let raw = format!("{prefix}${{TARGET}}{suffix}");
            let out = substitute_with(&raw, &env);
            prop_assert_eq!(out.as_ref(), format!("{prefix}{value}{suffix}"));
        }

        #[test]
        fn prop_substitution_is_idempotent(value in "[A-Za-z0-9 ._-]{0,16}") {
            let env = MapEnv::new().with_var("V", value);
            let once = substitute_with("a${V}b", &env).into_owned();
            let twice = substitute_with(&once, &env).into_owned();
            prop_assert_eq!(once, twice);
        }
    }
}
