//! Call-tracking mock functions.
//!
//! A [`MockFn`] wraps an optional user-supplied implementation and records
//! every invocation — arguments plus the returned value or thrown error —
//! in an append-only history. Tracking is transparent to control flow: the
//! outcome is recorded synchronously at call time and then propagated to
//! the caller unchanged.
//!
//! # Example
//!
//! ```rust
//! use verdict::{args, MockFn};
//! use serde_json::json;
//!
//! let m = MockFn::with_impl(|args| Ok(args[0].clone()));
//! m.call(args![1]).unwrap();
//! m.call(args![2]).unwrap();
//!
//! assert_eq!(m.call_count(), 2);
//! assert_eq!(m.last_return(), Some(json!(2)));
//! assert!(m.called_with(&args![1]));
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// The implementation a mock delegates to. `Err` models a thrown error.
pub type MockImpl = dyn Fn(&[Value]) -> Result<Value, Value> + Send + Sync;

/// Outcome of one tracked invocation. Exactly one variant per call;
/// a thrown invocation never carries a return value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CallOutcome {
    /// The implementation returned normally with this value.
    Returned(Value),
    /// The implementation threw this error.
    Threw(Value),
}

impl CallOutcome {
    /// The returned value, if this call returned normally.
    pub fn returned(&self) -> Option<&Value> {
        match self {
            CallOutcome::Returned(v) => Some(v),
            CallOutcome::Threw(_) => None,
        }
    }
}

/// One logged invocation of a tracked function.
#[derive(Debug, Clone, Serialize)]
pub struct CallRecord {
    /// 1-based invocation order.
    pub index: usize,
    /// The argument list received.
    pub args: Vec<Value>,
    /// Returned value or thrown error.
    pub outcome: CallOutcome,
    /// When the call was made.
    pub timestamp: DateTime<Utc>,
}

struct MockInner {
    implementation: Option<Box<MockImpl>>,
    calls: Mutex<Vec<CallRecord>>,
}

/// A callable wrapper that records every invocation for later inspection.
///
/// Cloning a `MockFn` yields a handle to the same history, so a mock can
/// be handed to the code under test and queried afterwards.
#[derive(Clone)]
pub struct MockFn {
    inner: Arc<MockInner>,
}

impl fmt::Debug for MockFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockFn")
            .field("calls", &self.call_count())
            .finish()
    }
}

impl Default for MockFn {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFn {
    /// Create a mock with no implementation. Every call succeeds and
    /// returns `Value::Null`.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MockInner {
                implementation: None,
                calls: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Create a mock that delegates to the given implementation.
    ///
    /// Return `Err` from the implementation to model a thrown error; the
    /// error is recorded as that call's outcome and propagated to the
    /// caller unchanged.
    pub fn with_impl(f: impl Fn(&[Value]) -> Result<Value, Value> + Send + Sync + 'static) -> Self {
        Self {
            inner: Arc::new(MockInner {
                implementation: Some(Box::new(f)),
                calls: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Invoke the mock with the given arguments.
    ///
    /// Appends exactly one [`CallRecord`] before returning, in invocation
    /// order, then propagates the implementation's outcome. Tracking never
    /// swallows or alters the outcome.
    pub fn call(&self, args: Vec<Value>) -> Result<Value, Value> {
        let outcome = match &self.inner.implementation {
            Some(f) => f(&args),
            None => Ok(Value::Null),
        };

        let mut calls = self.lock_calls();
        let index = calls.len() + 1;
        calls.push(CallRecord {
            index,
            args,
            outcome: match &outcome {
                Ok(v) => CallOutcome::Returned(v.clone()),
                Err(e) => CallOutcome::Threw(e.clone()),
            },
            timestamp: Utc::now(),
        });
        drop(calls);

        outcome
    }

    // =========================================================================
    // Query accessors (read-only, never mutate history)
    // =========================================================================

    /// Total number of calls, including ones that threw.
    pub fn call_count(&self) -> usize {
        self.lock_calls().len()
    }

    /// Whether any call occurred.
    pub fn was_called(&self) -> bool {
        self.call_count() > 0
    }

    /// Snapshot of the full call history, in invocation order.
    pub fn calls(&self) -> Vec<CallRecord> {
        self.lock_calls().clone()
    }

    /// The nth call (1-indexed), if it exists.
    pub fn nth_call(&self, n: usize) -> Option<CallRecord> {
        if n == 0 {
            return None;
        }
        self.lock_calls().get(n - 1).cloned()
    }

    /// The most recent call, if any.
    pub fn last_call(&self) -> Option<CallRecord> {
        self.lock_calls().last().cloned()
    }

    /// Whether any call received exactly this argument list (deep equality).
    pub fn called_with(&self, args: &[Value]) -> bool {
        self.lock_calls().iter().any(|c| c.args == args)
    }

    /// Number of calls that returned normally. Thrown calls are excluded.
    pub fn return_count(&self) -> usize {
        self.lock_calls()
            .iter()
            .filter(|c| c.outcome.returned().is_some())
            .count()
    }

    /// Whether any call returned normally.
    pub fn has_returned(&self) -> bool {
        self.return_count() > 0
    }

    /// The value returned by the nth call (1-indexed).
    ///
    /// `None` if the call does not exist or threw.
    pub fn nth_return(&self, n: usize) -> Option<Value> {
        self.nth_call(n)
            .and_then(|c| c.outcome.returned().cloned())
    }

    /// The value returned by the last call. `None` if the last call threw
    /// or no call was made.
    pub fn last_return(&self) -> Option<Value> {
        self.last_call()
            .and_then(|c| c.outcome.returned().cloned())
    }

    /// Whether any normally-returning call produced this value.
    pub fn returned_with(&self, value: &Value) -> bool {
        self.lock_calls()
            .iter()
            .any(|c| c.outcome.returned() == Some(value))
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<CallRecord>> {
        // A panicking test must not poison the history for later queries.
        self.inner
            .calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Build a `Vec<serde_json::Value>` argument list from JSON-able expressions.
///
/// # Example
///
/// ```rust
/// use verdict::{args, MockFn};
///
/// let m = MockFn::new();
/// m.call(args![1, "two", [3]]).unwrap();
/// assert!(m.called_with(&args![1, "two", [3]]));
/// ```
#[macro_export]
macro_rules! args {
    ($($json:tt)*) => {
        // Splat the whole argument list into a json! array so that full
        // JSON literal syntax works inline.
        match $crate::serde_json::json!([ $($json)* ]) {
            $crate::serde_json::Value::Array(values) => values,
            _ => ::std::unreachable!(),
        }
    };
}
