//! Legacy environment-admin account.
//!
//! A single operator account configured entirely outside the credential
//! store, via `ADMIN_EMAIL` and `ADMIN_PASSWORD`. When configured, a login
//! with exactly these credentials is issued a token whose subject is the
//! `"admin"` sentinel, which the authorization policy treats as globally
//! privileged. Both variables must be present; a half-configured account is
//! rejected at startup.

use std::env;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct EnvAdminConfig {
    pub email: String,
    pub password: String,
}

impl EnvAdminConfig {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Read the environment-admin account from the process environment.
    ///
    /// Returns `Ok(None)` when neither variable is set (the account is
    /// simply disabled), an error when only one of them is.
    pub fn from_env() -> Result<Option<Self>, AppError> {
        let email = env::var("ADMIN_EMAIL").ok().filter(|s| !s.trim().is_empty());
        let password = env::var("ADMIN_PASSWORD")
            .ok()
            .filter(|s| !s.trim().is_empty());

        match (email, password) {
            (Some(email), Some(password)) => Ok(Some(Self::new(email, password))),
            (None, None) => Ok(None),
            _ => Err(AppError::config(
                "ADMIN_EMAIL and ADMIN_PASSWORD must be set together or not at all",
            )),
        }
    }

    /// Constant-shape credential check for the login fallback.
    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }
}
