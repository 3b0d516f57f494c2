//! Fluent assertion handles.
//!
//! This module provides the core engine types:
//! - `expect()` / `expect_future()` - Entry points for creating assertions
//! - `Assertion` - Per-expect state machine: subject plus negation flag
//! - `DeferredAssertion` - An assertion whose subject is a settling future
//!
//! Matcher dispatch is an explicit registry lookup: the handle exposes a
//! small fixed set of modifiers (`not`, `resolves`, `rejects`) and resolves
//! every other matcher name through the process-wide registry via
//! [`verify`](Assertion::verify). The snake_case convenience methods are
//! thin wrappers over `verify` with the registered builtin names.

use futures::future::BoxFuture;
use serde_json::Value;
use std::future::Future;

use crate::error::AssertError;
use crate::registry::{self, Matcher};
use crate::subject::{Actual, PendingSubject, Subject};

/// The pending outcome of a deferred assertion: settles once the subject
/// does and the matcher has been evaluated. Awaiting it is the unit of
/// pass/fail.
pub type PendingVerdict = BoxFuture<'static, Result<(), AssertError>>;

/// Create an assertion on a subject.
///
/// Accepts a `serde_json::Value` or a [`MockFn`](crate::MockFn) (by value
/// or reference). For pending futures use [`expect_future`].
///
/// # Example
///
/// ```rust
/// use verdict::expect;
/// use serde_json::json;
///
/// expect(json!(2)).to_be_greater_than(1).unwrap();
/// expect(json!("hello")).not().to_match("^bye").unwrap();
/// ```
pub fn expect(subject: impl Into<Subject>) -> Assertion {
    Assertion::new(subject.into())
}

/// Create an assertion on a future that has not settled yet.
///
/// The future's `Ok` is the resolution value and `Err` the rejection
/// value; both convert into `serde_json::Value`. Evaluation is deferred:
/// mark the handle with [`resolves`](Assertion::resolves) or
/// [`rejects`](Assertion::rejects), then `.await` the verdict the matcher
/// call returns.
///
/// # Example
///
/// ```rust,ignore
/// use verdict::expect_future;
/// use serde_json::{json, Value};
///
/// expect_future(async { Ok::<_, Value>(json!(1)) })
///     .resolves()?
///     .to_be(1)?
///     .await?;
/// ```
pub fn expect_future<F, T, E>(future: F) -> Assertion
where
    F: Future<Output = Result<T, E>> + Send + 'static,
    T: Into<Value>,
    E: Into<Value>,
{
    Assertion::new(Subject::Pending(Box::pin(async move {
        future.await.map(Into::into).map_err(Into::into)
    })))
}

/// How a deferred assertion interprets the settled subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    /// Await success; the resolution value becomes the subject.
    Resolve,
    /// Await failure; the rejection value becomes the subject. Successful
    /// resolution is itself an assertion failure.
    Reject,
}

/// Evaluate a matcher verdict under the negation flag.
///
/// Exactly one check applies: negation off fails on `!pass` with the
/// matcher's message verbatim; negation on fails on `pass` with the
/// "should not " rendering.
fn evaluate(
    matcher: &Matcher,
    actual: &Actual,
    args: &[Value],
    negated: bool,
) -> Result<(), AssertError> {
    let result = matcher.invoke(actual, args);
    if negated {
        if result.pass {
            return Err(AssertError::Failure {
                message: format!("should not {}", result.message),
            });
        }
    } else if !result.pass {
        return Err(AssertError::Failure {
            message: result.message,
        });
    }
    Ok(())
}

fn lookup(name: &str) -> Result<Matcher, AssertError> {
    registry::lookup(name).ok_or_else(|| AssertError::UnknownMatcher {
        name: name.to_string(),
    })
}

/// Per-`expect()` assertion handle.
///
/// Short-lived: created fresh by [`expect`], consumed by the matcher call.
/// Negation is a boolean XOR, so `not().not()` restores the original
/// polarity.
#[derive(Debug)]
pub struct Assertion {
    subject: Subject,
    negated: bool,
}

impl Assertion {
    fn new(subject: Subject) -> Self {
        Self {
            subject,
            negated: false,
        }
    }

    // =========================================================================
    // Modifiers (chainable)
    // =========================================================================

    /// Flip the negation flag.
    pub fn not(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    /// Mark the subject for deferred evaluation against its resolution
    /// value.
    ///
    /// # Errors
    ///
    /// [`AssertError::NotPending`] (a usage error, raised synchronously)
    /// when the subject is not a pending future.
    pub fn resolves(self) -> Result<DeferredAssertion, AssertError> {
        self.defer(Deferred::Resolve)
    }

    /// Mark the subject for deferred evaluation against its rejection
    /// value. A subject that resolves successfully fails the assertion.
    ///
    /// # Errors
    ///
    /// [`AssertError::NotPending`] (a usage error, raised synchronously)
    /// when the subject is not a pending future.
    pub fn rejects(self) -> Result<DeferredAssertion, AssertError> {
        self.defer(Deferred::Reject)
    }

    fn defer(self, mode: Deferred) -> Result<DeferredAssertion, AssertError> {
        match self.subject {
            Subject::Pending(future) => Ok(DeferredAssertion {
                future,
                negated: self.negated,
                mode,
            }),
            Subject::Value(_) | Subject::Mock(_) => Err(AssertError::NotPending),
        }
    }

    // =========================================================================
    // Matcher dispatch
    // =========================================================================

    /// Invoke a matcher by its registered name.
    ///
    /// This is the dispatch path behind every convenience method and the
    /// only way to reach custom matchers added through
    /// [`add_matchers`](crate::add_matchers).
    ///
    /// # Errors
    ///
    /// - [`AssertError::UnknownMatcher`] (usage) when the name is not
    ///   registered.
    /// - [`AssertError::UnresolvedSubject`] (usage) when the subject is a
    ///   pending future: mark it with `resolves()`/`rejects()` first.
    /// - [`AssertError::Failure`] (assertion) when the verdict, under the
    ///   negation flag, does not hold.
    pub fn verify(self, name: &str, args: &[Value]) -> Result<(), AssertError> {
        let matcher = lookup(name)?;
        let actual = match self.subject {
            Subject::Value(v) => Actual::Value(v),
            Subject::Mock(m) => Actual::Mock(m),
            Subject::Pending(_) => return Err(AssertError::UnresolvedSubject),
        };
        evaluate(&matcher, &actual, args, self.negated)
    }

    // =========================================================================
    // Value matchers
    // =========================================================================

    /// Assert the subject equals the expected value.
    pub fn to_be(self, expected: impl Into<Value>) -> Result<(), AssertError> {
        self.verify("to_be", &[expected.into()])
    }

    /// Assert the subject deep-equals the expected value.
    pub fn to_equal(self, expected: impl Into<Value>) -> Result<(), AssertError> {
        self.verify("to_equal", &[expected.into()])
    }

    /// Assert the subject is truthy (not null, false, 0, or "").
    pub fn to_be_truthy(self) -> Result<(), AssertError> {
        self.verify("to_be_truthy", &[])
    }

    /// Assert the subject is falsy.
    pub fn to_be_falsy(self) -> Result<(), AssertError> {
        self.verify("to_be_falsy", &[])
    }

    /// Assert the subject is null.
    pub fn to_be_null(self) -> Result<(), AssertError> {
        self.verify("to_be_null", &[])
    }

    /// Assert the string subject contains the pattern literally or matches
    /// it as a regex.
    pub fn to_match(self, pattern: &str) -> Result<(), AssertError> {
        self.verify("to_match", &[pattern.into()])
    }

    /// Assert the object subject has the given key.
    pub fn to_have_property(self, name: &str) -> Result<(), AssertError> {
        self.verify("to_have_property", &[name.into()])
    }

    /// Assert the subject's length (array, string, or a numeric `"length"`
    /// member) equals `n`.
    pub fn to_have_length(self, n: u64) -> Result<(), AssertError> {
        self.verify("to_have_length", &[n.into()])
    }

    /// Assert the array subject contains the item, or the string subject
    /// contains the substring.
    pub fn to_contain(self, item: impl Into<Value>) -> Result<(), AssertError> {
        self.verify("to_contain", &[item.into()])
    }

    /// Assert the numeric subject is greater than the expected value.
    pub fn to_be_greater_than(self, expected: impl Into<Value>) -> Result<(), AssertError> {
        self.verify("to_be_greater_than", &[expected.into()])
    }

    /// Assert the numeric subject is greater than or equal to the expected
    /// value.
    pub fn to_be_greater_than_or_equal(
        self,
        expected: impl Into<Value>,
    ) -> Result<(), AssertError> {
        self.verify("to_be_greater_than_or_equal", &[expected.into()])
    }

    /// Assert the numeric subject is less than the expected value.
    pub fn to_be_less_than(self, expected: impl Into<Value>) -> Result<(), AssertError> {
        self.verify("to_be_less_than", &[expected.into()])
    }

    /// Assert the numeric subject is less than or equal to the expected
    /// value.
    pub fn to_be_less_than_or_equal(self, expected: impl Into<Value>) -> Result<(), AssertError> {
        self.verify("to_be_less_than_or_equal", &[expected.into()])
    }

    // =========================================================================
    // Mock matchers
    // =========================================================================

    /// Assert the mock subject was called at least once.
    pub fn to_have_been_called(self) -> Result<(), AssertError> {
        self.verify("to_have_been_called", &[])
    }

    /// Assert the mock subject was called exactly `n` times.
    pub fn to_have_been_called_times(self, n: u64) -> Result<(), AssertError> {
        self.verify("to_have_been_called_times", &[n.into()])
    }

    /// Assert some call received exactly this argument list.
    pub fn to_have_been_called_with(self, args: Vec<Value>) -> Result<(), AssertError> {
        self.verify("to_have_been_called_with", &args)
    }

    /// Assert the most recent call received exactly this argument list.
    pub fn to_have_been_last_called_with(self, args: Vec<Value>) -> Result<(), AssertError> {
        self.verify("to_have_been_last_called_with", &args)
    }

    /// Assert the nth call (1-indexed) received exactly this argument list.
    pub fn to_have_been_nth_called_with(
        self,
        n: u64,
        args: Vec<Value>,
    ) -> Result<(), AssertError> {
        let mut full_args = Vec::with_capacity(args.len() + 1);
        full_args.push(n.into());
        full_args.extend(args);
        self.verify("to_have_been_nth_called_with", &full_args)
    }

    /// Assert at least one call returned normally.
    pub fn to_have_returned(self) -> Result<(), AssertError> {
        self.verify("to_have_returned", &[])
    }

    /// Assert exactly `n` calls returned normally (thrown calls excluded).
    pub fn to_have_returned_times(self, n: u64) -> Result<(), AssertError> {
        self.verify("to_have_returned_times", &[n.into()])
    }

    /// Assert some normally-returning call produced this value.
    pub fn to_have_returned_with(self, value: impl Into<Value>) -> Result<(), AssertError> {
        self.verify("to_have_returned_with", &[value.into()])
    }

    /// Assert the most recent call returned this value.
    pub fn to_have_last_returned_with(self, value: impl Into<Value>) -> Result<(), AssertError> {
        self.verify("to_have_last_returned_with", &[value.into()])
    }

    /// Assert the nth call (1-indexed) returned this value.
    pub fn to_have_nth_returned_with(
        self,
        n: u64,
        value: impl Into<Value>,
    ) -> Result<(), AssertError> {
        self.verify("to_have_nth_returned_with", &[n.into(), value.into()])
    }
}

/// An assertion whose subject is still settling.
///
/// Produced by [`Assertion::resolves`] / [`Assertion::rejects`]. Matcher
/// calls resolve the matcher name synchronously (so usage errors surface
/// at call time, never deferred) and return a [`PendingVerdict`]; nothing
/// else is evaluated until the caller awaits it.
pub struct DeferredAssertion {
    future: PendingSubject,
    negated: bool,
    mode: Deferred,
}

impl std::fmt::Debug for DeferredAssertion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeferredAssertion")
            .field("negated", &self.negated)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl DeferredAssertion {
    /// Flip the negation flag. `resolves().not()` and `not().resolves()`
    /// are equivalent.
    pub fn not(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    /// Invoke a matcher by its registered name once the subject settles.
    ///
    /// The matcher is looked up synchronously, before any future is
    /// created: an unknown name is a usage error returned from this call
    /// itself, never deferred. The `Ok` value is the pending verdict to
    /// await.
    ///
    /// # Errors
    ///
    /// - [`AssertError::UnknownMatcher`] (usage), returned synchronously,
    ///   when the name is not registered.
    /// - From the awaited verdict: [`AssertError::Rejected`] (propagated)
    ///   when a `resolves()` subject fails (the rejection value surfaces
    ///   unchanged and the matcher never runs), and
    ///   [`AssertError::Failure`] (assertion) when a `rejects()` subject
    ///   resolves successfully, or when the verdict under negation does
    ///   not hold.
    pub fn verify(self, name: &str, args: &[Value]) -> Result<PendingVerdict, AssertError> {
        let matcher = lookup(name)?;
        let args = args.to_vec();
        let Self {
            future,
            negated,
            mode,
        } = self;

        Ok(Box::pin(async move {
            let settled = future.await;

            let actual = match mode {
                Deferred::Resolve => match settled {
                    Ok(value) => Actual::Value(value),
                    Err(error) => return Err(AssertError::Rejected(error)),
                },
                Deferred::Reject => match settled {
                    Ok(value) => {
                        // Successful resolution under `rejects` is a failed
                        // expectation regardless of negation, matching the
                        // synthesized failure in the rejection channel.
                        return Err(AssertError::Failure {
                            message: format!("future did not reject, resolved to {value}"),
                        });
                    }
                    Err(error) => Actual::Value(error),
                },
            };

            evaluate(&matcher, &actual, &args, negated)
        }))
    }

    /// Assert the settled subject equals the expected value.
    pub fn to_be(self, expected: impl Into<Value>) -> Result<PendingVerdict, AssertError> {
        self.verify("to_be", &[expected.into()])
    }

    /// Assert the settled subject deep-equals the expected value.
    pub fn to_equal(self, expected: impl Into<Value>) -> Result<PendingVerdict, AssertError> {
        self.verify("to_equal", &[expected.into()])
    }

    /// Assert the settled subject is truthy.
    pub fn to_be_truthy(self) -> Result<PendingVerdict, AssertError> {
        self.verify("to_be_truthy", &[])
    }

    /// Assert the settled subject is falsy.
    pub fn to_be_falsy(self) -> Result<PendingVerdict, AssertError> {
        self.verify("to_be_falsy", &[])
    }

    /// Assert the settled subject is null.
    pub fn to_be_null(self) -> Result<PendingVerdict, AssertError> {
        self.verify("to_be_null", &[])
    }

    /// Assert the settled string subject matches the pattern.
    pub fn to_match(self, pattern: &str) -> Result<PendingVerdict, AssertError> {
        self.verify("to_match", &[pattern.into()])
    }

    /// Assert the settled object subject has the given key.
    pub fn to_have_property(self, name: &str) -> Result<PendingVerdict, AssertError> {
        self.verify("to_have_property", &[name.into()])
    }

    /// Assert the settled subject's length equals `n`.
    pub fn to_have_length(self, n: u64) -> Result<PendingVerdict, AssertError> {
        self.verify("to_have_length", &[n.into()])
    }

    /// Assert the settled subject contains the item or substring.
    pub fn to_contain(self, item: impl Into<Value>) -> Result<PendingVerdict, AssertError> {
        self.verify("to_contain", &[item.into()])
    }

    /// Assert the settled numeric subject is greater than the expected
    /// value.
    pub fn to_be_greater_than(
        self,
        expected: impl Into<Value>,
    ) -> Result<PendingVerdict, AssertError> {
        self.verify("to_be_greater_than", &[expected.into()])
    }

    /// Assert the settled numeric subject is greater than or equal to the
    /// expected value.
    pub fn to_be_greater_than_or_equal(
        self,
        expected: impl Into<Value>,
    ) -> Result<PendingVerdict, AssertError> {
        self.verify("to_be_greater_than_or_equal", &[expected.into()])
    }

    /// Assert the settled numeric subject is less than the expected value.
    pub fn to_be_less_than(
        self,
        expected: impl Into<Value>,
    ) -> Result<PendingVerdict, AssertError> {
        self.verify("to_be_less_than", &[expected.into()])
    }

    /// Assert the settled numeric subject is less than or equal to the
    /// expected value.
    pub fn to_be_less_than_or_equal(
        self,
        expected: impl Into<Value>,
    ) -> Result<PendingVerdict, AssertError> {
        self.verify("to_be_less_than_or_equal", &[expected.into()])
    }
}
