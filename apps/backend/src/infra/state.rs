use sea_orm::DatabaseConnection;

use crate::ai::generator::ContentGenerator;
use crate::config::db::{DbOwner, DbProfile};
use crate::config::env_admin::EnvAdminConfig;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: SecurityConfig,
    db_profile: Option<DbProfile>,
    conn: Option<DatabaseConnection>,
    env_admin: Option<EnvAdminConfig>,
    generator: Option<ContentGenerator>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            db_profile: None,
            conn: None,
            env_admin: None,
            generator: None,
        }
    }

    /// Connect to the configured database profile and migrate at build time.
    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.db_profile = Some(profile);
        self
    }

    /// Use an already-open connection. Takes precedence over `with_db`;
    /// the caller is responsible for the schema.
    pub fn with_conn(mut self, conn: DatabaseConnection) -> Self {
        self.conn = Some(conn);
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub fn with_env_admin(mut self, env_admin: Option<EnvAdminConfig>) -> Self {
        self.env_admin = env_admin;
        self
    }

    pub fn with_generator(mut self, generator: Option<ContentGenerator>) -> Self {
        self.generator = generator;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let state = if let Some(conn) = self.conn {
            AppState::new(conn, self.security_config)
        } else if let Some(profile) = self.db_profile {
            // single entrypoint: build + migrate
            let conn = bootstrap_db(profile, DbOwner::App).await?;
            AppState::new(conn, self.security_config)
        } else {
            AppState::new_without_db(self.security_config)
        };

        Ok(state
            .with_env_admin(self.env_admin)
            .with_generator(self.generator))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
