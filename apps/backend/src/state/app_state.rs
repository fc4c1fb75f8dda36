use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::ai::generator::ContentGenerator;
use crate::config::env_admin::EnvAdminConfig;

/// Application state containing shared, read-only resources.
///
/// Everything here is fixed at process start; request handlers never mutate
/// it.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (optional for test scenarios)
    db: Option<DatabaseConnection>,
    /// Security configuration including JWT settings
    pub security: SecurityConfig,
    /// Legacy environment-admin account, if configured
    pub env_admin: Option<EnvAdminConfig>,
    /// Generative content client, if configured
    pub generator: Option<ContentGenerator>,
}

impl AppState {
    /// Create a new AppState with the given database connection and security config
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        Self {
            db: Some(db),
            security,
            env_admin: None,
            generator: None,
        }
    }

    /// Create a new AppState without a database connection (for testing)
    pub fn new_without_db(security: SecurityConfig) -> Self {
        Self {
            db: None,
            security,
            env_admin: None,
            generator: None,
        }
    }

    pub fn with_env_admin(mut self, env_admin: Option<EnvAdminConfig>) -> Self {
        self.env_admin = env_admin;
        self
    }

    pub fn with_generator(mut self, generator: Option<ContentGenerator>) -> Self {
        self.generator = generator;
        self
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}
