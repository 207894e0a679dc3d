//! Tests for HTTP error mapping.

use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::domain::Error;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn violations() -> Value {
    json!([{
        "type": "missing",
        "loc": ["body", "name"],
        "msg": "Field required",
        "input": {}
    }])
}

async fn render(error: &Error) -> (StatusCode, Option<String>, Value) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("trace id is ASCII").to_owned());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = serde_json::from_slice(&bytes).expect("error body is JSON");
    (status, trace_id, body)
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::UNPROCESSABLE_ENTITY)]
#[case(Error::not_found("Recipe not found"), StatusCode::NOT_FOUND)]
#[case(Error::service_unavailable("pool timed out"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

#[rstest]
#[actix_web::test]
async fn validation_errors_render_violation_list(violations: Value) {
    let error = Error::invalid_request("request validation failed").with_details(violations.clone());

    let (status, _, body) = render(&error).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({ "detail": violations }));
}

#[rstest]
#[actix_web::test]
async fn not_found_renders_plain_message() {
    let (status, _, body) = render(&Error::not_found("Recipe not found")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "Recipe not found" }));
}

#[rstest]
#[case(Error::internal("syntax error at or near SELECT"), "Internal server error")]
#[case(
    Error::service_unavailable("recipe store unavailable: connection refused"),
    "Service temporarily unavailable"
)]
#[actix_web::test]
async fn server_failures_are_redacted(#[case] error: Error, #[case] expected: &str) {
    let (_, _, body) = render(&error.with_details(json!({ "secret": true }))).await;

    assert_eq!(body, json!({ "detail": expected }));
}

#[rstest]
#[actix_web::test]
async fn trace_id_header_is_echoed_when_present() {
    let traced = Error::not_found("Recipe not found").with_trace_id(TRACE_ID);
    let (_, header, _) = render(&traced).await;
    assert_eq!(header.as_deref(), Some(TRACE_ID));

    let (_, header, _) = render(&Error::not_found("Recipe not found")).await;
    assert_eq!(header, None);
}
