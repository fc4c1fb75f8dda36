//! Assertions for the API's stable error contract.
//!
//! Every error response is RFC 7807 `application/problem+json` with a
//! machine-readable `code` and a `trace_id` that also appears in the
//! `x-trace-id` response header. These helpers check that contract without
//! depending on backend types.

use actix_web::http::header::HeaderMap;
use actix_web::http::StatusCode;
use serde::Deserialize;

/// The wire shape every error response must have.
#[derive(Debug, Deserialize)]
pub struct ProblemBody {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

/// Assert raw response parts conform to the error contract: status matches,
/// the body parses as Problem Details with the expected `code`, and the
/// `x-trace-id` header is present and equal to the body's `trace_id`.
///
/// Returns the parsed body for any further test-specific checks.
pub async fn assert_problem_details_from_parts(
    status: StatusCode,
    headers: &HeaderMap,
    body_bytes: &[u8],
    expected_code: &str,
    expected_status: StatusCode,
    expected_detail_contains: Option<&str>,
) -> ProblemBody {
    assert_eq!(status, expected_status, "unexpected HTTP status");

    let problem: ProblemBody = serde_json::from_slice(body_bytes)
        .unwrap_or_else(|e| panic!("body is not Problem Details JSON: {e}"));

    let header_id = headers
        .get("x-trace-id")
        .expect("x-trace-id header missing")
        .to_str()
        .expect("x-trace-id header is not UTF-8");
    assert_eq!(problem.trace_id, header_id, "trace_id header/body mismatch");

    assert_eq!(problem.code, expected_code);
    assert_eq!(problem.status, expected_status.as_u16());
    assert!(!problem.type_.is_empty());
    assert!(!problem.title.is_empty());

    if let Some(needle) = expected_detail_contains {
        assert!(
            problem.detail.contains(needle),
            "detail {:?} does not contain {needle:?}",
            problem.detail
        );
    }

    problem
}
