//! Built-in matchers over plain JSON values.
//!
//! Message convention (see [`MatchResult`]): pass messages are verb phrases
//! completing "should not ...", fail messages are standalone sentences.

use regex::Regex;
use serde_json::Value;

use super::fmt_value;
use crate::registry::{MatchResult, Matcher, MatcherRegistry};

pub(super) fn register(registry: &mut MatcherRegistry) {
    registry.register("to_be", Matcher::on_value(to_be));
    registry.register("to_equal", Matcher::on_value(to_equal));
    registry.register("to_be_truthy", Matcher::on_value(to_be_truthy));
    registry.register("to_be_falsy", Matcher::on_value(to_be_falsy));
    registry.register("to_be_null", Matcher::on_value(to_be_null));
    registry.register("to_match", Matcher::on_value(to_match));
    registry.register("to_have_property", Matcher::on_value(to_have_property));
    registry.register("to_have_length", Matcher::on_value(to_have_length));
    registry.register("to_contain", Matcher::on_value(to_contain));
    registry.register(
        "to_be_greater_than",
        Matcher::on_value(|v, a| compare(v, a, "be greater than", |x, y| x > y)),
    );
    registry.register(
        "to_be_greater_than_or_equal",
        Matcher::on_value(|v, a| compare(v, a, "be greater than or equal to", |x, y| x >= y)),
    );
    registry.register(
        "to_be_less_than",
        Matcher::on_value(|v, a| compare(v, a, "be less than", |x, y| x < y)),
    );
    registry.register(
        "to_be_less_than_or_equal",
        Matcher::on_value(|v, a| compare(v, a, "be less than or equal to", |x, y| x <= y)),
    );
}

fn required_arg<'a>(args: &'a [Value], name: &str) -> Result<&'a Value, MatchResult> {
    args.first()
        .ok_or_else(|| MatchResult::fail(format!("{name} requires an expected value argument")))
}

fn to_be(subject: &Value, args: &[Value]) -> MatchResult {
    let expected = match required_arg(args, "to_be") {
        Ok(v) => v,
        Err(fail) => return fail,
    };
    if subject == expected {
        MatchResult::pass(format!("be {}", fmt_value(expected)))
    } else {
        MatchResult::fail(format!(
            "expected {} to be {}",
            fmt_value(subject),
            fmt_value(expected)
        ))
    }
}

fn to_equal(subject: &Value, args: &[Value]) -> MatchResult {
    let expected = match required_arg(args, "to_equal") {
        Ok(v) => v,
        Err(fail) => return fail,
    };
    if subject == expected {
        MatchResult::pass(format!("equal {}", fmt_value(expected)))
    } else {
        MatchResult::fail(format!(
            "expected {} to equal {}",
            fmt_value(subject),
            fmt_value(expected)
        ))
    }
}

/// JS truthiness mapped to JSON: null, false, 0, and "" are falsy;
/// arrays and objects are always truthy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn to_be_truthy(subject: &Value, _args: &[Value]) -> MatchResult {
    if is_truthy(subject) {
        MatchResult::pass("be truthy")
    } else {
        MatchResult::fail(format!("expected {} to be truthy", fmt_value(subject)))
    }
}

fn to_be_falsy(subject: &Value, _args: &[Value]) -> MatchResult {
    if !is_truthy(subject) {
        MatchResult::pass("be falsy")
    } else {
        MatchResult::fail(format!("expected {} to be falsy", fmt_value(subject)))
    }
}

fn to_be_null(subject: &Value, _args: &[Value]) -> MatchResult {
    if subject.is_null() {
        MatchResult::pass("be null")
    } else {
        MatchResult::fail(format!("expected {} to be null", fmt_value(subject)))
    }
}

/// Literal substring first, then regex. An invalid pattern is a failed
/// match carrying the regex error.
fn to_match(subject: &Value, args: &[Value]) -> MatchResult {
    let pattern = match required_arg(args, "to_match") {
        Ok(v) => v,
        Err(fail) => return fail,
    };
    let (Some(text), Some(pattern)) = (subject.as_str(), pattern.as_str()) else {
        return MatchResult::fail(format!(
            "expected a string subject and pattern, got {}",
            fmt_value(subject)
        ));
    };

    if text.contains(pattern) {
        return MatchResult::pass(format!("match '{pattern}'"));
    }
    match Regex::new(pattern) {
        Ok(re) if re.is_match(text) => MatchResult::pass(format!("match '{pattern}'")),
        Ok(_) => MatchResult::fail(format!("expected '{text}' to match '{pattern}'")),
        Err(e) => MatchResult::fail(format!("invalid pattern '{pattern}': {e}")),
    }
}

fn to_have_property(subject: &Value, args: &[Value]) -> MatchResult {
    let name = match required_arg(args, "to_have_property") {
        Ok(v) => v,
        Err(fail) => return fail,
    };
    let Some(name) = name.as_str() else {
        return MatchResult::fail(format!(
            "property name must be a string, got {}",
            fmt_value(name)
        ));
    };

    match subject.as_object() {
        Some(map) if map.contains_key(name) => {
            MatchResult::pass(format!("have property '{name}'"))
        }
        _ => MatchResult::fail(format!(
            "expected {} to have property '{name}'",
            fmt_value(subject)
        )),
    }
}

fn to_have_length(subject: &Value, args: &[Value]) -> MatchResult {
    let expected = match required_arg(args, "to_have_length") {
        Ok(v) => v,
        Err(fail) => return fail,
    };
    let Some(expected) = expected.as_u64() else {
        return MatchResult::fail(format!(
            "expected length must be a number, got {}",
            fmt_value(expected)
        ));
    };

    // Objects may carry an explicit numeric "length" member, duck-typed.
    let actual = match subject {
        Value::Array(items) => Some(items.len() as u64),
        Value::String(s) => Some(s.chars().count() as u64),
        Value::Object(map) => map.get("length").and_then(Value::as_u64),
        _ => None,
    };

    match actual {
        Some(len) if len == expected => MatchResult::pass(format!("have length {expected}")),
        Some(len) => MatchResult::fail(format!(
            "expected {} to have length {expected}, got {len}",
            fmt_value(subject)
        )),
        None => MatchResult::fail(format!("expected {} to have a length", fmt_value(subject))),
    }
}

fn to_contain(subject: &Value, args: &[Value]) -> MatchResult {
    let item = match required_arg(args, "to_contain") {
        Ok(v) => v,
        Err(fail) => return fail,
    };

    let contained = match subject {
        Value::Array(items) => items.contains(item),
        Value::String(s) => item.as_str().map(|needle| s.contains(needle)).unwrap_or(false),
        _ => false,
    };

    if contained {
        MatchResult::pass(format!("contain {}", fmt_value(item)))
    } else {
        MatchResult::fail(format!(
            "expected {} to contain {}",
            fmt_value(subject),
            fmt_value(item)
        ))
    }
}

fn compare(
    subject: &Value,
    args: &[Value],
    verb: &str,
    cmp: impl Fn(f64, f64) -> bool,
) -> MatchResult {
    let expected = match required_arg(args, verb) {
        Ok(v) => v,
        Err(fail) => return fail,
    };
    let (Some(a), Some(b)) = (subject.as_f64(), expected.as_f64()) else {
        return MatchResult::fail(format!(
            "expected numbers to compare, got {} and {}",
            fmt_value(subject),
            fmt_value(expected)
        ));
    };

    if cmp(a, b) {
        MatchResult::pass(format!("{verb} {expected}"))
    } else {
        MatchResult::fail(format!("expected {subject} to {verb} {expected}"))
    }
}
