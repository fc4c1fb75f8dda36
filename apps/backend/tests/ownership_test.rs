//! End-to-end ownership policy over blogs: two registered admins and the
//! environment admin acting on each other's resources. Mutations resolve
//! existence before ownership, so a missing resource is always 404 and a
//! foreign one always 403.

mod common;
mod support;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use backend::middleware::jwt_extract::JwtExtract;
use backend::middleware::request_trace::RequestTrace;
use backend::routes;
use backend_test_support::unique_email;
use common::assert_problem;
use serde_json::json;
use support::state_helpers::{env_admin_token, sqlite_state, test_security};

macro_rules! full_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .wrap(RequestTrace)
                .app_data(web::Data::new($state))
                .service(
                    web::scope("/api/admin")
                        .wrap(JwtExtract)
                        .configure(routes::admin::configure_routes),
                )
                .configure(routes::configure),
        )
        .await
    };
}

/// Register a fresh admin through the API and return its bearer token.
async fn register_admin<S>(app: &S, label: &str) -> String
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
{
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "name": label,
            "email": unique_email(label),
            "password": "pw-123456"
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    body["token"].as_str().expect("token present").to_string()
}

async fn create_blog<S>(app: &S, token: &str, title: &str, published: bool) -> String
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
{
    let req = test::TestRequest::post()
        .uri("/api/admin/blogs")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({
            "title": title,
            "subTitle": "a subtitle",
            "description": "<p>body</p>",
            "category": "Technology",
            "isPublished": published
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    body["blog"]["id"].as_str().expect("blog id").to_string()
}

#[actix_web::test]
async fn owner_may_toggle_foreign_admin_may_not() -> Result<(), Box<dyn std::error::Error>> {
    let state = sqlite_state().await?;
    let app = full_app!(state);

    let u1 = register_admin(&app, "owner").await;
    let u2 = register_admin(&app, "intruder").await;
    let blog_id = create_blog(&app, &u1, "Owned Post", false).await;

    // Foreign admin: known resource, not entitled -> 403
    let req = test::TestRequest::patch()
        .uri(&format!("/api/admin/blogs/{blog_id}/toggle-publish"))
        .insert_header(("Authorization", format!("Bearer {u2}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::FORBIDDEN, "FORBIDDEN").await;

    // Owner: flips the flag
    let req = test::TestRequest::patch()
        .uri(&format!("/api/admin/blogs/{blog_id}/toggle-publish"))
        .insert_header(("Authorization", format!("Bearer {u1}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["blog"]["isPublished"], true);

    // Environment admin: global privilege flips it back
    let env_token = env_admin_token(&test_security());
    let req = test::TestRequest::patch()
        .uri(&format!("/api/admin/blogs/{blog_id}/toggle-publish"))
        .insert_header(("Authorization", format!("Bearer {env_token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["blog"]["isPublished"], false);
    Ok(())
}

#[actix_web::test]
async fn missing_blog_is_404_before_any_ownership_check(
) -> Result<(), Box<dyn std::error::Error>> {
    let state = sqlite_state().await?;
    let app = full_app!(state);
    let u1 = register_admin(&app, "lonely").await;

    let req = test::TestRequest::delete()
        .uri("/api/admin/blogs/00000000-0000-0000-0000-000000000000")
        .insert_header(("Authorization", format!("Bearer {u1}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::NOT_FOUND, "BLOG_NOT_FOUND").await;

    // Malformed id never reaches the database
    let req = test::TestRequest::delete()
        .uri("/api/admin/blogs/not-a-uuid")
        .insert_header(("Authorization", format!("Bearer {u1}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::BAD_REQUEST, "INVALID_BLOG_ID").await;
    Ok(())
}

#[actix_web::test]
async fn foreign_admin_may_not_delete() -> Result<(), Box<dyn std::error::Error>> {
    let state = sqlite_state().await?;
    let app = full_app!(state);

    let u1 = register_admin(&app, "author").await;
    let u2 = register_admin(&app, "rival").await;
    let blog_id = create_blog(&app, &u1, "Protected Post", true).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/blogs/{blog_id}"))
        .insert_header(("Authorization", format!("Bearer {u2}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::FORBIDDEN, "FORBIDDEN").await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/blogs/{blog_id}"))
        .insert_header(("Authorization", format!("Bearer {u1}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    Ok(())
}

#[actix_web::test]
async fn admin_listings_are_scoped_to_the_owner() -> Result<(), Box<dyn std::error::Error>> {
    let state = sqlite_state().await?;
    let app = full_app!(state);

    let u1 = register_admin(&app, "writer").await;
    let u2 = register_admin(&app, "reader").await;
    create_blog(&app, &u1, "Draft One", false).await;
    create_blog(&app, &u1, "Published One", true).await;

    // Owner sees both, drafts included
    let req = test::TestRequest::get()
        .uri("/api/admin/blogs")
        .insert_header(("Authorization", format!("Bearer {u1}")))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["blogs"].as_array().map(Vec::len), Some(2));

    // The other admin sees nothing
    let req = test::TestRequest::get()
        .uri("/api/admin/blogs")
        .insert_header(("Authorization", format!("Bearer {u2}")))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["blogs"].as_array().map(Vec::len), Some(0));

    // The environment admin sees everything
    let env_token = env_admin_token(&test_security());
    let req = test::TestRequest::get()
        .uri("/api/admin/blogs")
        .insert_header(("Authorization", format!("Bearer {env_token}")))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["blogs"].as_array().map(Vec::len), Some(2));

    // The public listing only carries the published one
    let req = test::TestRequest::get().uri("/api/blogs").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let blogs = body["blogs"].as_array().expect("blogs array");
    assert_eq!(blogs.len(), 1);
    assert_eq!(blogs[0]["title"], "Published One");
    Ok(())
}

#[actix_web::test]
async fn dashboard_counts_follow_the_owner_scope() -> Result<(), Box<dyn std::error::Error>> {
    let state = sqlite_state().await?;
    let app = full_app!(state);

    let u1 = register_admin(&app, "stats").await;
    create_blog(&app, &u1, "Draft A", false).await;
    create_blog(&app, &u1, "Draft B", false).await;
    create_blog(&app, &u1, "Live A", true).await;

    let req = test::TestRequest::get()
        .uri("/api/admin/dashboard")
        .insert_header(("Authorization", format!("Bearer {u1}")))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["stats"]["total_blogs"], 3);
    assert_eq!(body["stats"]["drafts"], 2);
    assert_eq!(body["stats"]["published"], 1);
    assert_eq!(body["stats"]["total_comments"], 0);
    assert_eq!(body["recentBlogs"].as_array().map(Vec::len), Some(3));
    Ok(())
}
