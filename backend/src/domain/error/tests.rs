//! Tests for error construction, trace capture, and the serialised envelope.

use super::*;
use crate::domain::TraceId;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[fixture]
fn base_error() -> Error {
    Error::invalid_request("bad")
}

#[rstest]
#[case(Error::invalid_request("x"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("x"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("x"), ErrorCode::Forbidden)]
#[case(Error::not_found("x"), ErrorCode::NotFound)]
#[case(Error::conflict("x"), ErrorCode::Conflict)]
#[case(Error::service_unavailable("x"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("x"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn try_with_trace_id_rejects_empty_values(base_error: Error) {
    let result = base_error.try_with_trace_id("   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyTraceId)));
}

#[rstest]
fn new_has_no_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let error = TraceId::scope(trace_id, async move { Error::internal("boom") }).await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn serialises_camel_case_envelope(base_error: Error, expected_trace_id: String) {
    let error = base_error
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({ "field": "title", "code": "empty_title" }));

    let value = serde_json::to_value(&error).expect("serialise error");

    assert_eq!(
        value,
        json!({
            "code": "invalid_request",
            "message": "bad",
            "traceId": expected_trace_id,
            "details": { "field": "title", "code": "empty_title" },
        })
    );
}

#[rstest]
fn omits_absent_optional_fields(base_error: Error) {
    let value = serde_json::to_value(&base_error).expect("serialise error");
    assert!(value.get("traceId").is_none());
    assert!(value.get("details").is_none());
}

#[rstest]
#[tokio::test]
async fn deserialising_ignores_ambient_trace(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let payload = json!({ "code": "not_found", "message": "missing" });

    let error = TraceId::scope(trace_id, async move {
        serde_json::from_value::<Error>(payload).expect("valid payload")
    })
    .await;

    assert!(error.trace_id().is_none());
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
fn deserialising_rejects_blank_messages() {
    let payload = json!({ "code": "not_found", "message": "  " });
    assert!(serde_json::from_value::<Error>(payload).is_err());
}
