#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod ai;
pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod trace_ctx;

// Re-exports for public API
pub use ai::ContentGenerator;
pub use auth::claims::{AdminClaims, Role};
pub use auth::jwt::{mint_access_token, verify_access_token, TOKEN_TTL_SECS};
pub use auth::policy::{authorize, owner_scope, OwnerScope, Subject, ENV_ADMIN_SUB};
pub use config::db::{db_url, DbOwner, DbProfile};
pub use config::env_admin::EnvAdminConfig;
pub use error::AppError;
pub use errors::ErrorCode;
pub use extractors::CurrentAdmin;
pub use infra::db::{bootstrap_db, connect_db};
pub use infra::state::{build_state, StateBuilder};
pub use middleware::cors::cors_middleware;
pub use middleware::jwt_extract::JwtExtract;
pub use middleware::request_trace::RequestTrace;
pub use middleware::structured_logger::StructuredLogger;
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
