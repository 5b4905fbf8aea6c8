//! Tests for the domain error payload.

use super::*;
use crate::domain::TraceId;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("login required"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("nope"), ErrorCode::Forbidden)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::conflict("taken"), ErrorCode::Conflict)]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_codes(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[test]
fn serialises_camel_case_without_empty_fields() {
    let value = serde_json::to_value(Error::not_found("missing")).expect("serialise");
    assert_eq!(value, json!({ "code": "not_found", "message": "missing" }));
}

#[test]
fn details_are_serialised_when_present() {
    let err = Error::invalid_request("username must not be empty")
        .with_details(json!({ "field": "username", "code": "empty_username" }));
    let value = serde_json::to_value(err).expect("serialise");
    assert_eq!(value["details"]["field"], "username");
}

#[tokio::test]
async fn captures_trace_id_in_scope() {
    let trace_id: TraceId = "00000000-0000-0000-0000-000000000001"
        .parse()
        .expect("trace id");
    let err = TraceId::scope(trace_id, async { Error::internal("boom") }).await;
    assert_eq!(err.trace_id(), Some("00000000-0000-0000-0000-000000000001"));
}

#[test]
fn no_trace_id_outside_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[rstest]
#[case(Error::from(UserValidationError::EmptyUsername), "username", "empty_username")]
#[case(Error::from(PostValidationError::EmptyComment), "text", "empty_comment")]
#[case(Error::from(PostValidationError::EmptyTitle), "title", "empty_title")]
fn validation_errors_carry_field_details(
    #[case] error: Error,
    #[case] field: &str,
    #[case] code: &str,
) {
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    let details = error.details().expect("details");
    assert_eq!(details["field"], field);
    assert_eq!(details["code"], code);
}
