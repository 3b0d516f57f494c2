//! Integration tests for deferred assertions: resolves/rejects modifiers
//! combined with negation, and the propagation rules for subject failures.

use serde_json::{json, Value};
use verdict::{expect, expect_future, AssertError, ErrorKind};

fn resolving(value: Value) -> impl std::future::Future<Output = Result<Value, Value>> + Send {
    async move { Ok(value) }
}

fn rejecting(error: Value) -> impl std::future::Future<Output = Result<Value, Value>> + Send {
    async move { Err(error) }
}

#[tokio::test]
async fn resolves_uses_resolution_value_as_subject() {
    expect_future(resolving(json!(1)))
        .resolves()
        .unwrap()
        .to_be(1)
        .unwrap()
        .await
        .unwrap();

    let err = expect_future(resolving(json!(1)))
        .resolves()
        .unwrap()
        .to_be(2)
        .unwrap()
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Assertion);
}

#[tokio::test]
async fn rejects_uses_rejection_value_as_subject() {
    expect_future(rejecting(json!("boom")))
        .rejects()
        .unwrap()
        .to_be("boom")
        .unwrap()
        .await
        .unwrap();

    expect_future(rejecting(json!({"code": 42})))
        .rejects()
        .unwrap()
        .to_have_property("code")
        .unwrap()
        .await
        .unwrap();
}

#[tokio::test]
async fn rejects_on_resolving_future_fails() {
    let err = expect_future(resolving(json!(7)))
        .rejects()
        .unwrap()
        .to_be(7)
        .unwrap()
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Assertion);
    assert_eq!(err.to_string(), "future did not reject, resolved to 7");
}

#[tokio::test]
async fn rejects_on_resolving_future_fails_even_under_negation() {
    // The "did not reject" failure is synthesized before the matcher runs,
    // so negation does not rescue it.
    let err = expect_future(resolving(json!(7)))
        .rejects()
        .unwrap()
        .not()
        .to_be(7)
        .unwrap()
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Assertion);
    assert!(err.to_string().contains("did not reject"));
}

#[tokio::test]
async fn resolves_on_rejecting_future_propagates_the_failure() {
    let err = expect_future(rejecting(json!("boom")))
        .resolves()
        .unwrap()
        .to_be("boom")
        .unwrap()
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Propagated);
    match err {
        AssertError::Rejected(value) => assert_eq!(value, json!("boom")),
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn negation_composes_with_resolves_in_either_order() {
    // not() before the modifier
    expect_future(resolving(json!(1)))
        .not()
        .resolves()
        .unwrap()
        .to_be(2)
        .unwrap()
        .await
        .unwrap();

    // not() after the modifier
    expect_future(resolving(json!(1)))
        .resolves()
        .unwrap()
        .not()
        .to_be(2)
        .unwrap()
        .await
        .unwrap();

    let err = expect_future(resolving(json!(1)))
        .resolves()
        .unwrap()
        .not()
        .to_be(1)
        .unwrap()
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "should not be 1");
}

#[tokio::test]
async fn negation_composes_with_rejects() {
    expect_future(rejecting(json!(1)))
        .rejects()
        .unwrap()
        .not()
        .to_be(2)
        .unwrap()
        .await
        .unwrap();

    expect_future(rejecting(json!(1)))
        .not()
        .rejects()
        .unwrap()
        .to_be(1)
        .unwrap()
        .await
        .unwrap_err();
}

#[tokio::test]
async fn deferred_value_matchers_work_on_settled_subject() {
    expect_future(resolving(json!([1, 2, 3])))
        .resolves()
        .unwrap()
        .to_contain(2)
        .unwrap()
        .await
        .unwrap();

    expect_future(resolving(json!("hello world")))
        .resolves()
        .unwrap()
        .to_match("^hello")
        .unwrap()
        .await
        .unwrap();

    expect_future(resolving(json!(10)))
        .resolves()
        .unwrap()
        .to_be_greater_than(9)
        .unwrap()
        .await
        .unwrap();

    expect_future(resolving(json!(null)))
        .resolves()
        .unwrap()
        .to_be_null()
        .unwrap()
        .await
        .unwrap();
}

#[test]
fn unknown_matcher_on_deferred_chain_errors_without_awaiting() {
    // The name is resolved at call time: no await, no polling. Dropping
    // the call must not lose the error.
    let err = expect_future(resolving(json!(1)))
        .resolves()
        .unwrap()
        .verify("to_be_fancy", &[])
        .err()
        .expect("usage error must surface without awaiting");

    assert_eq!(err.kind(), ErrorKind::Usage);
    assert_eq!(err.to_string(), "matcher not found: to_be_fancy");
}

#[tokio::test]
async fn modifier_on_non_pending_subject_is_synchronous_usage_error() {
    // No await involved: the error surfaces from the modifier itself.
    let err = expect(json!(1)).resolves().unwrap_err();
    assert!(matches!(err, AssertError::NotPending));

    let err = expect(json!(1)).rejects().unwrap_err();
    assert!(matches!(err, AssertError::NotPending));
}

#[tokio::test]
async fn typed_futures_convert_into_values() {
    // Output types only need Into<Value>.
    expect_future(async { Ok::<i64, String>(3) })
        .resolves()
        .unwrap()
        .to_be(3)
        .unwrap()
        .await
        .unwrap();

    expect_future(async { Err::<i64, String>("nope".to_string()) })
        .rejects()
        .unwrap()
        .to_be("nope")
        .unwrap()
        .await
        .unwrap();
}

#[tokio::test]
async fn deferred_verdict_is_observed_only_at_await() {
    // Building the verdict does not settle anything; awaiting it is the
    // unit of pass/fail.
    let pending = expect_future(resolving(json!(1)))
        .resolves()
        .unwrap()
        .to_be(2)
        .unwrap();

    let err = pending.await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Assertion);
}
