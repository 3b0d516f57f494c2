//! Subject types: what `expect()` receives and what matchers see.
//!
//! [`Subject`] is the raw input to an assertion — a plain JSON value, a
//! tracked mock function, or a pending future. [`Actual`] is the resolved
//! form handed to matchers once any future has settled: futures never
//! reach a matcher.

use futures::future::BoxFuture;
use serde_json::Value;
use std::fmt;

use crate::mock::MockFn;

/// A pending asynchronous subject: settles with either a resolution value
/// or a rejection value.
pub type PendingSubject = BoxFuture<'static, Result<Value, Value>>;

/// The value under test, as received by `expect()`.
pub enum Subject {
    /// A plain JSON value.
    Value(Value),
    /// A tracked mock function, for call-history matchers.
    Mock(MockFn),
    /// A future that has not settled yet. Requires `resolves()` or
    /// `rejects()` before a matcher can run.
    Pending(PendingSubject),
}

impl fmt::Debug for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Subject::Mock(m) => f.debug_tuple("Mock").field(m).finish(),
            Subject::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

impl From<Value> for Subject {
    fn from(value: Value) -> Self {
        Subject::Value(value)
    }
}

impl From<MockFn> for Subject {
    fn from(mock: MockFn) -> Self {
        Subject::Mock(mock)
    }
}

impl From<&MockFn> for Subject {
    fn from(mock: &MockFn) -> Self {
        Subject::Mock(mock.clone())
    }
}

/// A resolved subject, as seen by matchers.
#[derive(Debug, Clone)]
pub enum Actual {
    /// A plain JSON value (possibly produced by awaiting a future).
    Value(Value),
    /// A tracked mock function.
    Mock(MockFn),
}

impl Actual {
    /// The underlying value, if this subject is one.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Actual::Value(v) => Some(v),
            Actual::Mock(_) => None,
        }
    }

    /// The underlying mock, if this subject is one.
    pub fn as_mock(&self) -> Option<&MockFn> {
        match self {
            Actual::Value(_) => None,
            Actual::Mock(m) => Some(m),
        }
    }
}
