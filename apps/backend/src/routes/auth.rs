//! Public authentication surface: login and registration.

use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::services::auth::{self, AuthSession};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Deserialize)]
struct RegisterRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionUser {
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    role: String,
    is_registered: bool,
}

#[derive(Debug, Serialize)]
struct SessionResponse {
    success: bool,
    message: &'static str,
    token: String,
    user: SessionUser,
}

impl SessionResponse {
    fn new(message: &'static str, session: AuthSession) -> Self {
        Self {
            success: true,
            message,
            token: session.token,
            user: SessionUser {
                email: session.email,
                name: session.name,
                role: session.role,
                is_registered: session.is_registered,
            },
        }
    }
}

async fn login(
    req: web::Json<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let session = auth::login(&app_state, &req.email, &req.password).await?;
    Ok(HttpResponse::Ok().json(SessionResponse::new("Login successful", session)))
}

async fn register(
    req: web::Json<RegisterRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let session = auth::register(&app_state, &req.name, &req.email, &req.password).await?;
    Ok(HttpResponse::Created().json(SessionResponse::new("Admin created", session)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            .route("/login", web::post().to(login))
            .route("/register", web::post().to(register)),
    );
}
