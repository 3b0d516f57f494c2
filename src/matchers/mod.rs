//! Built-in matchers.
//!
//! Each matcher is a self-contained predicate registered by name; the
//! assertion engine only knows the [`Matcher`](crate::Matcher) contract.
//! Custom matchers are added at runtime through
//! [`add_matchers`](crate::add_matchers) and may shadow any builtin.

mod mock;
mod value;

use serde_json::Value;

use crate::registry::MatcherRegistry;

/// Seed a registry with the full built-in matcher set.
pub(crate) fn register_builtins(registry: &mut MatcherRegistry) {
    value::register(registry);
    mock::register(registry);
}

/// Render a value for a matcher message: strings in single quotes, every
/// other type as compact JSON. Shared by all builtins so the same value
/// reads the same everywhere.
pub(super) fn fmt_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{s}'"),
        other => other.to_string(),
    }
}

/// Render an argument list as `(a, b, c)` using [`fmt_value`] per element.
pub(super) fn fmt_args(args: &[Value]) -> String {
    let parts: Vec<String> = args.iter().map(fmt_value).collect();
    format!("({})", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fmt_value_quotes_strings_only() {
        assert_eq!(fmt_value(&json!("x")), "'x'");
        assert_eq!(fmt_value(&json!(1)), "1");
        assert_eq!(fmt_value(&json!(null)), "null");
        assert_eq!(fmt_value(&json!([1, "a"])), "[1,\"a\"]");
    }

    #[test]
    fn test_fmt_args_renders_elements_consistently() {
        assert_eq!(fmt_args(&[json!(1), json!("x")]), "(1, 'x')");
        assert_eq!(fmt_args(&[]), "()");
    }

    #[test]
    fn test_all_builtins_registered() {
        let registry = MatcherRegistry::with_builtins();
        for name in [
            "to_be",
            "to_equal",
            "to_be_truthy",
            "to_be_falsy",
            "to_be_null",
            "to_match",
            "to_have_property",
            "to_have_length",
            "to_contain",
            "to_be_greater_than",
            "to_be_greater_than_or_equal",
            "to_be_less_than",
            "to_be_less_than_or_equal",
            "to_have_been_called",
            "to_have_been_called_times",
            "to_have_been_called_with",
            "to_have_been_last_called_with",
            "to_have_been_nth_called_with",
            "to_have_returned",
            "to_have_returned_times",
            "to_have_returned_with",
            "to_have_last_returned_with",
            "to_have_nth_returned_with",
        ] {
            assert!(registry.lookup(name).is_some(), "missing builtin: {name}");
        }
    }
}
