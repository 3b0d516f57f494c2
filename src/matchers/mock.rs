//! Built-in matchers over mock call history.
//!
//! All "returned" queries exclude calls whose outcome was a thrown error:
//! such calls count toward the total call count but never toward return
//! counts or returned-value comparisons.

use serde_json::Value;

use super::{fmt_args, fmt_value};
use crate::mock::MockFn;
use crate::registry::{MatchResult, Matcher, MatcherRegistry};

pub(super) fn register(registry: &mut MatcherRegistry) {
    registry.register("to_have_been_called", Matcher::on_mock(to_have_been_called));
    registry.register(
        "to_have_been_called_times",
        Matcher::on_mock(to_have_been_called_times),
    );
    registry.register(
        "to_have_been_called_with",
        Matcher::on_mock(to_have_been_called_with),
    );
    registry.register(
        "to_have_been_last_called_with",
        Matcher::on_mock(to_have_been_last_called_with),
    );
    registry.register(
        "to_have_been_nth_called_with",
        Matcher::on_mock(to_have_been_nth_called_with),
    );
    registry.register("to_have_returned", Matcher::on_mock(to_have_returned));
    registry.register(
        "to_have_returned_times",
        Matcher::on_mock(to_have_returned_times),
    );
    registry.register(
        "to_have_returned_with",
        Matcher::on_mock(to_have_returned_with),
    );
    registry.register(
        "to_have_last_returned_with",
        Matcher::on_mock(to_have_last_returned_with),
    );
    registry.register(
        "to_have_nth_returned_with",
        Matcher::on_mock(to_have_nth_returned_with),
    );
}

fn count_arg(args: &[Value], name: &str) -> Result<u64, MatchResult> {
    args.first()
        .and_then(Value::as_u64)
        .ok_or_else(|| MatchResult::fail(format!("{name} requires a count argument")))
}

fn to_have_been_called(mock: &MockFn, _args: &[Value]) -> MatchResult {
    if mock.was_called() {
        MatchResult::pass("have been called")
    } else {
        MatchResult::fail("expected mock to have been called, but it never was")
    }
}

fn to_have_been_called_times(mock: &MockFn, args: &[Value]) -> MatchResult {
    let expected = match count_arg(args, "to_have_been_called_times") {
        Ok(n) => n,
        Err(fail) => return fail,
    };
    let actual = mock.call_count() as u64;
    if actual == expected {
        MatchResult::pass(format!("have been called {expected} times"))
    } else {
        MatchResult::fail(format!(
            "expected mock to have been called {expected} times, got {actual}"
        ))
    }
}

fn to_have_been_called_with(mock: &MockFn, args: &[Value]) -> MatchResult {
    if mock.called_with(args) {
        MatchResult::pass(format!("have been called with {}", fmt_args(args)))
    } else {
        MatchResult::fail(format!(
            "expected mock to have been called with {}",
            fmt_args(args)
        ))
    }
}

fn to_have_been_last_called_with(mock: &MockFn, args: &[Value]) -> MatchResult {
    match mock.last_call() {
        Some(call) if call.args == args => {
            MatchResult::pass(format!("have been last called with {}", fmt_args(args)))
        }
        Some(call) => MatchResult::fail(format!(
            "expected mock to have been last called with {}, got {}",
            fmt_args(args),
            fmt_args(&call.args)
        )),
        None => MatchResult::fail(format!(
            "expected mock to have been last called with {}, but it was never called",
            fmt_args(args)
        )),
    }
}

/// First argument is the 1-based call index; the rest are the expected
/// argument list.
fn to_have_been_nth_called_with(mock: &MockFn, args: &[Value]) -> MatchResult {
    let Some(n) = args.first().and_then(Value::as_u64) else {
        return MatchResult::fail("to_have_been_nth_called_with requires a call index argument");
    };
    let expected = &args[1..];

    match mock.nth_call(n as usize) {
        Some(call) if call.args == expected => MatchResult::pass(format!(
            "have been called with {} on call #{n}",
            fmt_args(expected)
        )),
        Some(call) => MatchResult::fail(format!(
            "expected call #{n} to be with {}, got {}",
            fmt_args(expected),
            fmt_args(&call.args)
        )),
        None => MatchResult::fail(format!(
            "expected call #{n} to exist, but only {} calls were made",
            mock.call_count()
        )),
    }
}

fn to_have_returned(mock: &MockFn, _args: &[Value]) -> MatchResult {
    if mock.has_returned() {
        MatchResult::pass("have returned")
    } else {
        MatchResult::fail("expected mock to have returned at least once")
    }
}

fn to_have_returned_times(mock: &MockFn, args: &[Value]) -> MatchResult {
    let expected = match count_arg(args, "to_have_returned_times") {
        Ok(n) => n,
        Err(fail) => return fail,
    };
    let actual = mock.return_count() as u64;
    if actual == expected {
        MatchResult::pass(format!("have returned {expected} times"))
    } else {
        MatchResult::fail(format!(
            "expected mock to have returned {expected} times, got {actual}"
        ))
    }
}

fn to_have_returned_with(mock: &MockFn, args: &[Value]) -> MatchResult {
    let Some(expected) = args.first() else {
        return MatchResult::fail("to_have_returned_with requires an expected value argument");
    };
    if mock.returned_with(expected) {
        MatchResult::pass(format!("have returned with {}", fmt_value(expected)))
    } else {
        MatchResult::fail(format!(
            "expected mock to have returned with {}",
            fmt_value(expected)
        ))
    }
}

fn to_have_last_returned_with(mock: &MockFn, args: &[Value]) -> MatchResult {
    let Some(expected) = args.first() else {
        return MatchResult::fail("to_have_last_returned_with requires an expected value argument");
    };
    match mock.last_return() {
        Some(actual) if &actual == expected => {
            MatchResult::pass(format!("have last returned with {}", fmt_value(expected)))
        }
        Some(actual) => MatchResult::fail(format!(
            "expected mock to have last returned with {}, got {}",
            fmt_value(expected),
            fmt_value(&actual)
        )),
        None => MatchResult::fail(format!(
            "expected mock to have last returned with {}, but the last call did not return",
            fmt_value(expected)
        )),
    }
}

/// First argument is the 1-based call index; second is the expected value.
fn to_have_nth_returned_with(mock: &MockFn, args: &[Value]) -> MatchResult {
    let Some(n) = args.first().and_then(Value::as_u64) else {
        return MatchResult::fail("to_have_nth_returned_with requires a call index argument");
    };
    let Some(expected) = args.get(1) else {
        return MatchResult::fail("to_have_nth_returned_with requires an expected value argument");
    };

    match mock.nth_return(n as usize) {
        Some(actual) if &actual == expected => MatchResult::pass(format!(
            "have returned with {} on call #{n}",
            fmt_value(expected)
        )),
        Some(actual) => MatchResult::fail(format!(
            "expected call #{n} to return {}, got {}",
            fmt_value(expected),
            fmt_value(&actual)
        )),
        None => MatchResult::fail(format!(
            "expected call #{n} to return {}, but it did not return",
            fmt_value(expected)
        )),
    }
}
