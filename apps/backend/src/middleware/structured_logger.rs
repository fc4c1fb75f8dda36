//! One structured log line per completed request.
//!
//! Level follows the outcome: 5xx at error, 4xx at warn, everything else at
//! info. Runs inside the RequestTrace scope, so the line carries the same
//! trace id the client sees in `x-trace-id`.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::Error as ActixError;
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use crate::trace_ctx;

pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let method = req.method().clone();
        let path = req.path().to_string();
        let started = Instant::now();

        let fut = self.service.call(req);

        Box::pin(async move {
            let outcome = fut.await;

            let status = match &outcome {
                Ok(res) => res.status(),
                Err(err) => err.as_response_error().status_code(),
            };
            let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
            let trace_id = trace_ctx::trace_id();

            if status.is_server_error() {
                error!(%method, %path, status = status.as_u16(), elapsed_ms, %trace_id, "request completed");
            } else if status.is_client_error() {
                warn!(%method, %path, status = status.as_u16(), elapsed_ms, %trace_id, "request completed");
            } else {
                info!(%method, %path, status = status.as_u16(), elapsed_ms, %trace_id, "request completed");
            }

            outcome
        })
    }
}
