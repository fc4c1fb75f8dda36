//! The stable error contract: every error body is RFC 7807 problem+json with
//! a machine code and a trace id that matches the x-trace-id header.

mod common;
mod support;

use actix_web::{test, web, App};
use backend::middleware::jwt_extract::JwtExtract;
use backend::middleware::request_trace::RequestTrace;
use backend::routes;
use support::state_helpers::no_db_state;

#[actix_web::test]
async fn error_bodies_are_problem_details() -> Result<(), Box<dyn std::error::Error>> {
    let state = no_db_state().await?;
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .app_data(web::Data::new(state))
            .service(
                web::scope("/api/admin")
                    .wrap(JwtExtract)
                    .configure(routes::admin::configure_routes),
            ),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/admin/me").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 401);

    let headers = resp.response().headers().clone();
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("application/problem+json"),
        "Content-Type must be application/problem+json (got {content_type})"
    );

    let trace_id_header = headers
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-trace-id header should be present")
        .to_string();
    assert!(!trace_id_header.is_empty());

    let body = test::read_body(resp).await;
    let problem: serde_json::Value = serde_json::from_slice(&body)?;

    for key in ["type", "title", "status", "detail", "code", "trace_id"] {
        assert!(problem.get(key).is_some(), "missing key {key}");
    }
    assert_eq!(problem["code"], "UNAUTHORIZED_MISSING_BEARER");
    assert_eq!(problem["status"], 401);
    assert_eq!(problem["trace_id"], trace_id_header);
    Ok(())
}
