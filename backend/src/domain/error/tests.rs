//! Tests for domain error construction.

use super::*;
use rstest::rstest;
use serde_json::json;
use uuid::Uuid;

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::not_found("Recipe not found"), ErrorCode::NotFound)]
#[case(Error::service_unavailable("store down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn convenience_constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_blank_messages() {
    let result = Error::try_new(ErrorCode::NotFound, "   ");
    assert_eq!(result, Err(ErrorValidationError::EmptyMessage));
}

#[rstest]
#[should_panic(expected = "error messages must satisfy validation")]
fn new_panics_on_blank_message() {
    let _ = Error::new(ErrorCode::InternalError, "");
}

#[rstest]
fn trace_id_is_absent_outside_request_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[tokio::test]
async fn trace_id_is_captured_from_scope() {
    let trace_id = TraceId::from_uuid(Uuid::nil());
    let error = TraceId::scope(trace_id, async { Error::not_found("Recipe not found") }).await;
    assert_eq!(error.trace_id(), Some("00000000-0000-0000-0000-000000000000"));
}

#[rstest]
fn details_are_attached() {
    let error = Error::invalid_request("invalid payload").with_details(json!([{"type": "missing"}]));
    assert_eq!(error.details(), Some(&json!([{"type": "missing"}])));
}

#[rstest]
fn display_uses_message() {
    assert_eq!(Error::not_found("Recipe not found").to_string(), "Recipe not found");
}
