#![allow(dead_code)]

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::test;

// Logging is auto-installed for every test binary that pulls in common
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Assert a response is a ProblemDetails error with the expected status and
/// code, including trace-id parity between body and header.
pub async fn assert_problem(
    resp: ServiceResponse<BoxBody>,
    expected_status: StatusCode,
    expected_code: &str,
) {
    let status = resp.status();
    let headers = resp.response().headers().clone();
    let body = test::read_body(resp).await;

    backend_test_support::assert_problem_details_from_parts(
        status,
        &headers,
        &body,
        expected_code,
        expected_status,
        None,
    )
    .await;
}
