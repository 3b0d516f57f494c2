//! # verdict
//!
//! A Jest-style fluent assertion library with call-tracking mock functions.
//!
//! Subjects are `serde_json::Value`s (or mocks, or settling futures);
//! matchers are named predicates resolved through a runtime-extensible
//! registry; failures are typed so a test runner can tell a failed
//! expectation apart from a malformed test.
//!
//! ## Quick start
//!
//! ```rust
//! use verdict::{args, expect, MockFn};
//! use serde_json::json;
//!
//! expect(json!(2)).to_be_greater_than(1).unwrap();
//! expect(json!("hello")).not().to_be("bye").unwrap();
//!
//! let m = MockFn::with_impl(|args| Ok(args[0].clone()));
//! m.call(args![1]).unwrap();
//! m.call(args![2]).unwrap();
//!
//! expect(&m).to_have_been_called_times(2).unwrap();
//! expect(&m).to_have_last_returned_with(2).unwrap();
//! ```
//!
//! ## Async subjects
//!
//! ```rust,ignore
//! use verdict::expect_future;
//! use serde_json::{json, Value};
//!
//! expect_future(async { Ok::<_, Value>(json!(1)) })
//!     .resolves()?
//!     .to_be(1)?
//!     .await?;
//!
//! expect_future(async { Err::<Value, _>(json!("boom")) })
//!     .rejects()?
//!     .to_be("boom")?
//!     .await?;
//! ```
//!
//! ## Custom matchers
//!
//! ```rust
//! use verdict::{add_matchers, expect, MatchResult, Matcher};
//! use serde_json::json;
//!
//! add_matchers([(
//!     "to_be_even",
//!     Matcher::on_value(|v, _| match v.as_i64() {
//!         Some(n) if n % 2 == 0 => MatchResult::pass("be even"),
//!         _ => MatchResult::fail(format!("expected {v} to be even")),
//!     }),
//! )]);
//!
//! expect(json!(4)).verify("to_be_even", &[]).unwrap();
//! ```

pub mod error;
pub mod expect;
mod matchers;
pub mod mock;
pub mod registry;
pub mod subject;

// Assertion engine
pub use expect::{expect, expect_future, Assertion, DeferredAssertion, PendingVerdict};

// Mock tracking
pub use mock::{CallOutcome, CallRecord, MockFn};

// Matcher contract and registry
pub use registry::{add_matchers, register, MatchResult, Matcher, MatcherRegistry};

// Subjects and errors
pub use error::{AssertError, ErrorKind};
pub use subject::{Actual, Subject};

// Re-exported for the `args!` macro.
#[doc(hidden)]
pub use serde_json;
