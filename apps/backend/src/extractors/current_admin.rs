use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};
use serde::Serialize;

use crate::auth::claims::AdminClaims;
use crate::auth::policy::Subject;
use crate::db::require_db;
use crate::error::AppError;
use crate::repos::admins;
use crate::state::app_state::AppState;

/// The admin identity behind the current request.
///
/// Built from the claims the auth gate stored in request extensions. The
/// token only proves identity; for registered admins the record is re-read
/// from the database on every request, so a deleted admin loses access the
/// moment their row is gone even while their token is still fresh. The
/// environment admin has no row and skips the lookup.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentAdmin {
    #[serde(skip)]
    pub subject: Subject,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_registered: bool,
}

impl FromRequest for CurrentAdmin {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            // Claims are stored by the JwtExtract middleware
            let claims = req
                .extensions()
                .get::<AdminClaims>()
                .cloned()
                .ok_or_else(AppError::unauthorized_missing_bearer)?;

            match Subject::from_sub(&claims.sub) {
                Subject::EnvAdmin => Ok(CurrentAdmin {
                    subject: Subject::EnvAdmin,
                    name: "Administrator".to_string(),
                    email: claims.email,
                    role: claims.role.as_str().to_string(),
                    is_registered: claims.is_registered,
                }),
                Subject::Registered(id_str) => {
                    let app_state = req
                        .app_data::<web::Data<AppState>>()
                        .ok_or_else(|| AppError::internal("AppState not available"))?;

                    let id = id_str
                        .parse::<uuid::Uuid>()
                        .map_err(|_| AppError::forbidden_admin_not_found())?;

                    let db = require_db(app_state)?;
                    let admin = admins::find_by_id(db, id)
                        .await?
                        .ok_or_else(AppError::forbidden_admin_not_found)?;

                    Ok(CurrentAdmin {
                        subject: Subject::Registered(id_str),
                        name: admin.name,
                        email: admin.email,
                        role: admin.role,
                        is_registered: admin.is_registered,
                    })
                }
            }
        })
    }
}
