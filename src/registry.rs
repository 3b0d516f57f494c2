//! The matcher contract and the process-wide matcher registry.
//!
//! A matcher is a pure predicate from a resolved subject (plus arguments)
//! to a [`MatchResult`]. The registry maps matcher names to
//! implementations; it is seeded once with the builtins and extended at
//! runtime through [`add_matchers`]. Entries can be shadowed by
//! re-registration but never removed.

use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::mock::MockFn;
use crate::subject::Actual;

/// The verdict of one matcher evaluation.
///
/// Message convention: a *fail* message is a standalone sentence, used
/// verbatim in failures ("expected 1 to be 2"). A *pass* message is a verb
/// phrase that reads correctly after the negation prefix "should not "
/// ("be 2" renders as "should not be 2").
#[derive(Debug, Clone)]
pub struct MatchResult {
    /// Whether the assertion held.
    pub pass: bool,
    /// Human-readable description, per the polarity convention above.
    pub message: String,
}

impl MatchResult {
    /// Create a passing result. `message` should complete "should not ...".
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            pass: true,
            message: message.into(),
        }
    }

    /// Create a failing result. `message` is used verbatim in the failure.
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            pass: false,
            message: message.into(),
        }
    }
}

type MatcherFn = dyn Fn(&Actual, &[Value]) -> MatchResult + Send + Sync;

/// A named predicate over a resolved subject.
///
/// Cloning is cheap (shared `Arc`). Matchers must be side-effect-free with
/// respect to engine state and never perform their own future handling —
/// the engine resolves pending subjects before dispatch.
#[derive(Clone)]
pub struct Matcher {
    f: Arc<MatcherFn>,
}

impl Matcher {
    /// Wrap a matcher function operating on any resolved subject.
    pub fn new(f: impl Fn(&Actual, &[Value]) -> MatchResult + Send + Sync + 'static) -> Self {
        Self { f: Arc::new(f) }
    }

    /// Wrap a matcher that only makes sense for plain values. A mock
    /// subject fails with a shape mismatch message.
    pub fn on_value(f: impl Fn(&Value, &[Value]) -> MatchResult + Send + Sync + 'static) -> Self {
        Self::new(move |actual, args| match actual.as_value() {
            Some(v) => f(v, args),
            None => MatchResult::fail("expected a value subject but got a mock function"),
        })
    }

    /// Wrap a matcher that only makes sense for mock functions. A value
    /// subject fails with a shape mismatch message.
    pub fn on_mock(f: impl Fn(&MockFn, &[Value]) -> MatchResult + Send + Sync + 'static) -> Self {
        Self::new(move |actual, args| match actual.as_mock() {
            Some(m) => f(m, args),
            None => MatchResult::fail("expected a mock function subject but got a value"),
        })
    }

    /// Evaluate the matcher against a resolved subject.
    pub fn invoke(&self, actual: &Actual, args: &[Value]) -> MatchResult {
        (self.f)(actual, args)
    }
}

impl std::fmt::Debug for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Matcher(..)")
    }
}

/// A name → matcher mapping.
///
/// The process-wide instance behind [`lookup`]/[`add_matchers`] is what
/// `expect()` consults; standalone registries are available for callers
/// that want isolation.
#[derive(Debug, Default)]
pub struct MatcherRegistry {
    matchers: HashMap<String, Matcher>,
}

impl MatcherRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry seeded with the built-in matchers.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::matchers::register_builtins(&mut registry);
        registry
    }

    /// Insert or overwrite an entry. No validation beyond being a matcher.
    pub fn register(&mut self, name: impl Into<String>, matcher: Matcher) {
        self.matchers.insert(name.into(), matcher);
    }

    /// Look a matcher up by name.
    pub fn lookup(&self, name: &str) -> Option<&Matcher> {
        self.matchers.get(name)
    }

    /// Number of registered matchers.
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

static REGISTRY: Lazy<RwLock<MatcherRegistry>> =
    Lazy::new(|| RwLock::new(MatcherRegistry::with_builtins()));

/// Look a matcher up in the process-wide registry.
pub fn lookup(name: &str) -> Option<Matcher> {
    REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .lookup(name)
        .cloned()
}

/// Merge matchers into the process-wide registry, silently overwriting
/// existing names. This is the extension mechanism for custom matchers.
///
/// # Example
///
/// ```rust
/// use verdict::{add_matchers, expect, MatchResult, Matcher};
/// use serde_json::json;
///
/// add_matchers([(
///     "to_be_fancy",
///     Matcher::on_value(|v, _args| {
///         if v == &json!("fancy") {
///             MatchResult::pass("be fancy")
///         } else {
///             MatchResult::fail(format!("expected {v} to be fancy"))
///         }
///     }),
/// )]);
///
/// assert!(expect(json!("fancy")).verify("to_be_fancy", &[]).is_ok());
/// assert!(expect(json!("plain")).verify("to_be_fancy", &[]).is_err());
/// ```
pub fn add_matchers<I, K>(entries: I)
where
    I: IntoIterator<Item = (K, Matcher)>,
    K: Into<String>,
{
    let mut registry = REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
    for (name, matcher) in entries {
        registry.register(name, matcher);
    }
}

/// Register a single matcher in the process-wide registry.
pub fn register(name: impl Into<String>, matcher: Matcher) {
    add_matchers([(name.into(), matcher)]);
}
