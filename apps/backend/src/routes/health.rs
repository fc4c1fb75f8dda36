use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::error::AppError;
use crate::state::app_state::AppState;

async fn root() -> HttpResponse {
    HttpResponse::Ok().body("Welcome to the Blog API")
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    database: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    latest_migration: Option<String>,
}

/// Liveness plus a shallow database probe. Reports degraded instead of
/// failing the request when the database is down, so orchestration can still
/// read the body.
async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let (database, latest_migration) = match app_state.db() {
        Some(db) => match migration::get_latest_migration_version(db).await {
            Ok(version) => ("ok", version),
            Err(_) => ("unreachable", None),
        },
        None => ("not-configured", None),
    };

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        database,
        latest_migration,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .route("/health", web::get().to(health));
}
