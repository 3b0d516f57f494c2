//! Error taxonomy for assertion evaluation.
//!
//! Failures are split into categories so a test runner can tell a failed
//! expectation apart from a malformed test: an unknown matcher name is a
//! bug in the test, not in the code under test.

use serde_json::Value;

/// Error raised by assertion evaluation.
#[derive(Debug, thiserror::Error)]
pub enum AssertError {
    /// A matcher evaluated and its verdict did not match the author's
    /// expectation (taking negation into account).
    #[error("{message}")]
    Failure { message: String },

    /// The matcher name was not found in the registry.
    #[error("matcher not found: {name}")]
    UnknownMatcher { name: String },

    /// `resolves()` or `rejects()` was applied to a subject that is not a
    /// pending future.
    #[error("expected value must be a future")]
    NotPending,

    /// A matcher was invoked on a pending subject without first marking it
    /// with `resolves()` or `rejects()`.
    #[error("pending subject must be awaited with resolves() or rejects()")]
    UnresolvedSubject,

    /// The subject future failed while `resolves()` expected it to succeed.
    /// Carries the rejection value unchanged.
    #[error("future unexpectedly rejected with {0}")]
    Rejected(Value),
}

/// Category of an [`AssertError`], for callers that report failed
/// expectations and malformed tests differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A matcher verdict that did not hold.
    Assertion,
    /// Malformed test code: unknown matcher or misapplied modifier.
    Usage,
    /// The subject's own failure, surfaced unchanged.
    Propagated,
}

impl AssertError {
    /// The category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AssertError::Failure { .. } => ErrorKind::Assertion,
            AssertError::UnknownMatcher { .. }
            | AssertError::NotPending
            | AssertError::UnresolvedSubject => ErrorKind::Usage,
            AssertError::Rejected(_) => ErrorKind::Propagated,
        }
    }

    /// Shorthand for `kind() == ErrorKind::Usage`.
    pub fn is_usage(&self) -> bool {
        self.kind() == ErrorKind::Usage
    }
}
