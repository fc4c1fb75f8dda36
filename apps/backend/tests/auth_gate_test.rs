//! The auth gate in isolation: header parsing and token verification,
//! exercised without any database. Only the environment-admin identity is
//! used, since it never touches the credential store.

mod common;
mod support;

use std::time::{Duration, SystemTime};

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use backend::middleware::jwt_extract::JwtExtract;
use backend::middleware::request_trace::RequestTrace;
use backend::{mint_access_token, routes, Role, ENV_ADMIN_SUB};
use common::assert_problem;
use support::state_helpers::{env_admin_token, no_db_state, test_security, ENV_ADMIN_EMAIL};

#[actix_web::test]
async fn missing_header_is_401_missing_bearer() -> Result<(), Box<dyn std::error::Error>> {
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
    assert_problem(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED_MISSING_BEARER").await;
    Ok(())
}

#[actix_web::test]
async fn garbage_token_is_401_invalid_jwt() -> Result<(), Box<dyn std::error::Error>> {
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

    for header in ["Bearer not-a-token", "aaaa.bbbb.cccc"] {
        let req = test::TestRequest::get()
            .uri("/api/admin/me")
            .insert_header(("Authorization", header))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED_INVALID_JWT").await;
    }
    Ok(())
}

#[actix_web::test]
async fn expired_token_is_401_expired_jwt() -> Result<(), Box<dyn std::error::Error>> {
    let state = no_db_state().await?;
    let security = test_security();
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

    // Minted two hours in the past so the 1-hour TTL is well past any leeway
    let stale = mint_access_token(
        ENV_ADMIN_SUB,
        ENV_ADMIN_EMAIL,
        Role::Admin,
        true,
        SystemTime::now() - Duration::from_secs(2 * 60 * 60),
        &security,
    )?;

    let req = test::TestRequest::get()
        .uri("/api/admin/me")
        .insert_header(("Authorization", format!("Bearer {stale}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED_EXPIRED_JWT").await;
    Ok(())
}

#[actix_web::test]
async fn bearer_scheme_without_a_token_is_401_missing_bearer(
) -> Result<(), Box<dyn std::error::Error>> {
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

    // The scheme with nothing after it is not a bare token
    for header in ["Bearer ", "Bearer    "] {
        let req = test::TestRequest::get()
            .uri("/api/admin/me")
            .insert_header(("Authorization", header))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED_MISSING_BEARER").await;
    }
    Ok(())
}

#[actix_web::test]
async fn gate_rejections_are_rendered_responses_not_service_errors(
) -> Result<(), Box<dyn std::error::Error>> {
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
    let resp = test::try_call_service(&app, req)
        .await
        .map_err(|e| format!("gate must render its rejection, got service error: {e}"))?;
    assert_problem(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED_MISSING_BEARER").await;
    Ok(())
}

#[actix_web::test]
async fn valid_token_passes_with_or_without_bearer_prefix(
) -> Result<(), Box<dyn std::error::Error>> {
    let state = no_db_state().await?;
    let security = test_security();
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

    let token = env_admin_token(&security);

    for header in [format!("Bearer {token}"), token.clone()] {
        let req = test::TestRequest::get()
            .uri("/api/admin/me")
            .insert_header(("Authorization", header))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["user"]["email"], ENV_ADMIN_EMAIL);
        assert_eq!(body["user"]["isRegistered"], true);
    }
    Ok(())
}

#[actix_web::test]
async fn public_routes_are_untouched_by_the_gate() -> Result<(), Box<dyn std::error::Error>> {
    let state = no_db_state().await?;
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .app_data(web::Data::new(state))
            .service(
                web::scope("/api/admin")
                    .wrap(JwtExtract)
                    .configure(routes::admin::configure_routes),
            )
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    Ok(())
}
