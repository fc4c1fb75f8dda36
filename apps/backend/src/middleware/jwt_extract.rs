//! JWT extraction middleware: the authentication gate.
//!
//! Wrapped around every protected scope. Extracts the token from the
//! Authorization header, verifies it, and stores the decoded [`AdminClaims`]
//! in request extensions. Handlers behind this gate never see a request
//! without verified, unexpired claims, and never re-invoke the token codec
//! themselves.
//!
//! Failure is always terminal for the request: a missing header is rejected
//! before any decode attempt, an expired token is rejected with a
//! distinguishable error, and there is no fallback to an anonymous identity.
//! Rejections are rendered as problem+json responses here rather than
//! bubbled up as service errors, so they pass through the outer middleware
//! like any other response.

use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::jwt::verify_access_token;
use crate::error::AppError;
use crate::state::app_state::AppState;

pub struct JwtExtract;

impl<S, B> Transform<S, ServiceRequest> for JwtExtract
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtExtractMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtExtractMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct JwtExtractMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtExtractMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        // All work happens at poll time, inside the request's trace scope,
        // so rejection bodies carry the same trace id as the response header.
        Box::pin(async move {
            let auth_header = req.headers().get(header::AUTHORIZATION).cloned();
            let token = match extract_token_from_header(auth_header.as_ref()) {
                Ok(token) => token,
                Err(err) => return Ok(req.error_response(err).map_into_right_body()),
            };

            let security = match req.app_data::<web::Data<AppState>>() {
                Some(state) => state.security.clone(),
                None => {
                    let err = AppError::internal("AppState not available");
                    return Ok(req.error_response(err).map_into_right_body());
                }
            };

            match verify_access_token(&token, &security) {
                Ok(claims) => {
                    req.extensions_mut().insert(claims);
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                Err(err) => Ok(req.error_response(err).map_into_right_body()),
            }
        })
    }
}

/// Pull the token out of an Authorization header value.
///
/// Accepts both `Bearer <token>` and a bare token, as the original clients
/// send either form. A missing or empty header is rejected without any
/// decode attempt.
fn extract_token_from_header(
    header_value: Option<&header::HeaderValue>,
) -> Result<String, AppError> {
    let auth_value = header_value.ok_or_else(AppError::unauthorized_missing_bearer)?;

    let auth_str = auth_value
        .to_str()
        .map_err(|_| AppError::unauthorized_missing_bearer())?;

    // Strip the scheme before trimming, so "Bearer " with nothing after it
    // is an empty token rather than the bare token "Bearer".
    let token = match auth_str.strip_prefix("Bearer ") {
        Some(rest) => rest.trim(),
        None => auth_str.trim(),
    };

    if token.is_empty() {
        return Err(AppError::unauthorized_missing_bearer());
    }

    Ok(token.to_string())
}

#[cfg(test)]
mod tests {
    use actix_web::http::header::HeaderValue;

    use super::extract_token_from_header;
    use crate::error::AppError;

    #[test]
    fn test_missing_header_rejected() {
        match extract_token_from_header(None) {
            Err(AppError::UnauthorizedMissingBearer) => {}
            other => panic!("Expected missing-bearer error, got {other:?}"),
        }
    }

    #[test]
    fn test_bearer_prefix_stripped() {
        let value = HeaderValue::from_static("Bearer abc.def.ghi");
        assert_eq!(
            extract_token_from_header(Some(&value)).unwrap(),
            "abc.def.ghi"
        );
    }

    #[test]
    fn test_bare_token_accepted() {
        let value = HeaderValue::from_static("abc.def.ghi");
        assert_eq!(
            extract_token_from_header(Some(&value)).unwrap(),
            "abc.def.ghi"
        );
    }

    #[test]
    fn test_empty_value_rejected() {
        for raw in ["", "Bearer ", "Bearer    ", "   "] {
            let value = HeaderValue::from_str(raw).unwrap();
            assert!(extract_token_from_header(Some(&value)).is_err(), "{raw:?}");
        }
    }
}
