//! Fluent assertion API.
//!
//! This module provides a Jest-like API for making assertions about JSON
//! values, mock call histories, and settling futures. Assertions evaluate
//! to `Result<(), AssertError>`: a failed expectation is
//! `AssertError::Failure`, while a malformed test (unknown matcher,
//! misapplied modifier) is a distinct usage-error category.
//!
//! # Example
//!
//! ```rust
//! use verdict::{args, expect, MockFn};
//! use serde_json::json;
//!
//! expect(json!([1, 2, 3])).to_contain(2).unwrap();
//! expect(json!(1)).not().to_be(2).unwrap();
//!
//! let m = MockFn::new();
//! m.call(args![1, 2]).unwrap();
//! expect(&m).to_have_been_called_with(args![1, 2]).unwrap();
//! ```

mod assertion;

pub use assertion::{expect, expect_future, Assertion, DeferredAssertion, PendingVerdict};

#[cfg(test)]
mod tests;
