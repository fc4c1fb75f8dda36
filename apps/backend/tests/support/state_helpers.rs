//! State and token helpers for integration tests.
//!
//! Tests run against an in-memory SQLite database so they need no external
//! services; the pool is pinned to a single connection because each SQLite
//! `:memory:` connection is its own database.

use std::time::SystemTime;

use backend::config::env_admin::EnvAdminConfig;
use backend::infra::state::build_state;
use backend::state::app_state::AppState;
use backend::state::security_config::SecurityConfig;
use backend::{mint_access_token, Role, ENV_ADMIN_SUB};
use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database};

pub const TEST_JWT_SECRET: &str = "test_secret_key_for_testing_purposes_only";

pub const ENV_ADMIN_EMAIL: &str = "root@blog.test";
pub const ENV_ADMIN_PASSWORD: &str = "env-admin-password";

pub fn test_security() -> SecurityConfig {
    SecurityConfig::new(TEST_JWT_SECRET.as_bytes())
}

/// Fresh in-memory database with the full schema applied.
pub async fn sqlite_state() -> Result<AppState, Box<dyn std::error::Error>> {
    let mut opts = ConnectOptions::new("sqlite::memory:".to_string());
    opts.max_connections(1);
    let conn = Database::connect(opts).await?;
    migrate(&conn, MigrationCommand::Up).await?;

    let state = build_state()
        .with_conn(conn)
        .with_security(test_security())
        .with_env_admin(Some(EnvAdminConfig::new(
            ENV_ADMIN_EMAIL,
            ENV_ADMIN_PASSWORD,
        )))
        .build()
        .await?;
    Ok(state)
}

/// State without any database, for exercising the auth gate in isolation.
pub async fn no_db_state() -> Result<AppState, Box<dyn std::error::Error>> {
    Ok(build_state().with_security(test_security()).build().await?)
}

pub fn env_admin_token(security: &SecurityConfig) -> String {
    mint_access_token(
        ENV_ADMIN_SUB,
        ENV_ADMIN_EMAIL,
        Role::Admin,
        true,
        SystemTime::now(),
        security,
    )
    .expect("token should mint")
}
