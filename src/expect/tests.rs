//! Tests for the assertion engine: dispatch, negation, and error
//! categories. Deferred (resolves/rejects) behavior is covered in
//! `tests/async_assertions.rs`.

use super::*;
use crate::error::{AssertError, ErrorKind};
use crate::mock::MockFn;
use crate::registry::{add_matchers, MatchResult, Matcher};
use crate::args;
use proptest::prelude::*;
use serde_json::json;

#[test]
fn test_passing_matcher_returns_ok() {
    expect(json!(1)).to_be(1).unwrap();
    expect(json!("hello")).to_equal("hello").unwrap();
}

#[test]
fn test_failing_matcher_is_assertion_failure() {
    let err = expect(json!(1)).to_be(2).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Assertion);
    assert_eq!(err.to_string(), "expected 1 to be 2");
}

#[test]
fn test_negation_inverts_verdict() {
    expect(json!(1)).not().to_be(2).unwrap();

    let err = expect(json!(1)).not().to_be(1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Assertion);
    assert_eq!(err.to_string(), "should not be 1");
}

#[test]
fn test_double_negation_is_identity() {
    expect(json!(1)).not().not().to_be(1).unwrap();
    expect(json!(1)).not().not().to_be(2).unwrap_err();

    // Triple negation equals single negation; the toggle is an XOR, not
    // a stack.
    expect(json!(1)).not().not().not().to_be(2).unwrap();
    expect(json!(1)).not().not().not().to_be(1).unwrap_err();
}

#[test]
fn test_unknown_matcher_is_usage_error() {
    let err = expect(json!(true)).verify("to_be_fancy", &[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Usage);
    assert_eq!(err.to_string(), "matcher not found: to_be_fancy");
}

#[test]
fn test_resolves_on_value_is_usage_error() {
    let err = expect(json!(1)).resolves().unwrap_err();
    assert!(matches!(err, AssertError::NotPending));
    assert_eq!(err.kind(), ErrorKind::Usage);
}

#[test]
fn test_rejects_on_mock_is_usage_error() {
    let err = expect(&MockFn::new()).rejects().unwrap_err();
    assert!(matches!(err, AssertError::NotPending));
}

#[test]
fn test_matcher_on_pending_subject_is_usage_error() {
    let assertion = expect_future(async { Ok::<_, serde_json::Value>(json!(1)) });
    let err = assertion.to_be(1).unwrap_err();
    assert!(matches!(err, AssertError::UnresolvedSubject));
    assert_eq!(err.kind(), ErrorKind::Usage);
}

#[test]
fn test_custom_matcher_via_add_matchers() {
    add_matchers([(
        "to_be_fancy_custom",
        Matcher::on_value(|v, _args| {
            if v == &json!("fancy") {
                MatchResult::pass("be fancy")
            } else {
                MatchResult::fail(format!("{v} was not fancy"))
            }
        }),
    )]);

    expect(json!("fancy"))
        .verify("to_be_fancy_custom", &[])
        .unwrap();
    let err = expect(json!("plain"))
        .verify("to_be_fancy_custom", &[])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Assertion);
    assert_eq!(err.to_string(), "\"plain\" was not fancy");

    // Negation applies to custom matchers the same way.
    let err = expect(json!("fancy"))
        .not()
        .verify("to_be_fancy_custom", &[])
        .unwrap_err();
    assert_eq!(err.to_string(), "should not be fancy");
}

#[test]
fn test_mock_subject_call_history() {
    let m = MockFn::new();
    m.call(args![1]).unwrap();
    m.call(args![2]).unwrap();
    m.call(args![3]).unwrap();

    expect(&m).to_have_been_called().unwrap();
    expect(&m).to_have_been_called_times(3).unwrap();
    expect(&m).to_have_been_nth_called_with(2, args![2]).unwrap();
    expect(&m)
        .to_have_been_nth_called_with(2, args![1])
        .unwrap_err();
    expect(&m).to_have_been_last_called_with(args![3]).unwrap();
    expect(&m).not().to_have_been_called_with(args![4]).unwrap();
}

#[test]
fn test_mock_thrown_call_excluded_from_returned() {
    let m = MockFn::with_impl(|args| {
        if args.is_empty() {
            Err(json!("TEST"))
        } else {
            Ok(args[0].clone())
        }
    });
    m.call(args![1]).unwrap();
    let _ = m.call(vec![]);

    expect(&m).to_have_been_called_times(2).unwrap();
    expect(&m).to_have_returned_times(1).unwrap();
    expect(&m).not().to_have_returned_with("TEST").unwrap();
    expect(&m).to_have_nth_returned_with(1, 1).unwrap();
    expect(&m).to_have_nth_returned_with(2, "TEST").unwrap_err();
}

#[test]
fn test_value_matcher_on_mock_subject_fails() {
    let err = expect(&MockFn::new()).to_be(1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Assertion);
    assert!(err.to_string().contains("mock function"));
}

#[test]
fn test_mock_matcher_on_value_subject_fails() {
    let err = expect(json!(1)).to_have_been_called().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Assertion);
}

#[test]
fn test_value_convenience_methods() {
    expect(json!(true)).to_be_truthy().unwrap();
    expect(json!(0)).to_be_falsy().unwrap();
    expect(json!(null)).to_be_null().unwrap();
    expect(json!("hello world")).to_match("^hello").unwrap();
    expect(json!({"a": 1})).to_have_property("a").unwrap();
    expect(json!([1, 2])).to_have_length(2).unwrap();
    expect(json!([1, 2, 3])).to_contain(2).unwrap();
    expect(json!(2)).to_be_greater_than(1).unwrap();
    expect(json!(2)).to_be_greater_than_or_equal(2).unwrap();
    expect(json!(1)).to_be_less_than(2).unwrap();
    expect(json!(1)).to_be_less_than_or_equal(1).unwrap();
}

#[test]
fn test_negated_convenience_methods() {
    expect(json!(false)).not().to_be_truthy().unwrap();
    expect(json!([])).not().to_contain(4).unwrap();
    expect(json!(1)).not().to_be_greater_than(2).unwrap();
    expect(json!("yo")).not().to_match("^hell").unwrap();
}

proptest! {
    #[test]
    fn prop_double_negation_identity(a in any::<i64>(), b in any::<i64>()) {
        let plain = expect(json!(a)).to_be(b).is_ok();
        let doubled = expect(json!(a)).not().not().to_be(b).is_ok();
        prop_assert_eq!(plain, doubled);
    }

    #[test]
    fn prop_negation_inverts(a in any::<i64>(), b in any::<i64>()) {
        let plain = expect(json!(a)).to_be(b).is_ok();
        let negated = expect(json!(a)).not().to_be(b).is_ok();
        prop_assert_ne!(plain, negated);
    }
}
