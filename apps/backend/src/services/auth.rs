//! Login and registration against the credential store, with the legacy
//! environment-admin fallback.

use tracing::{info, warn};

use crate::auth::claims::Role;
use crate::auth::jwt::mint_access_token;
use crate::auth::policy::ENV_ADMIN_SUB;
use crate::db::require_db;
use crate::error::AppError;
use crate::errors::{DomainError, ErrorCode};
use crate::logging::pii::Redacted;
use crate::repos::admins;
use crate::state::app_state::AppState;
use crate::trace_ctx;

/// A freshly authenticated session: the minted token plus the identity
/// snapshot handlers echo back to the client.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub name: Option<String>,
    pub email: String,
    pub role: String,
    pub is_registered: bool,
}

fn role_from_str(role: &str) -> Role {
    if role.eq_ignore_ascii_case("user") {
        Role::User
    } else {
        Role::Admin
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Authenticate with email and password.
///
/// The credential store is consulted first; a stored admin with a wrong
/// password is rejected outright, never falling through to the environment
/// account. Only when no record matches the email is the environment admin
/// considered. Both failure paths collapse into the same `InvalidCredentials`
/// so a caller cannot probe which emails exist.
pub async fn login(state: &AppState, email: &str, password: &str) -> Result<AuthSession, AppError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(AppError::invalid(
            ErrorCode::ValidationError,
            "Email and password are required",
        ));
    }

    let normalized = normalize_email(email);
    let db = require_db(state)?;

    if let Some(admin) = admins::find_by_email(db, &normalized).await? {
        let password_ok = bcrypt::verify(password, &admin.password_hash)
            .map_err(|e| AppError::internal(format!("password verification failed: {e}")))?;
        if !password_ok {
            warn!(trace_id = %trace_ctx::trace_id(), email = %Redacted(&normalized), "login rejected: wrong password");
            return Err(AppError::invalid_credentials());
        }

        let token = mint_access_token(
            &admin.id.to_string(),
            &admin.email,
            role_from_str(&admin.role),
            admin.is_registered,
            std::time::SystemTime::now(),
            &state.security,
        )?;
        info!(trace_id = %trace_ctx::trace_id(), admin_id = %admin.id, "admin login");
        return Ok(AuthSession {
            token,
            name: Some(admin.name),
            email: admin.email,
            role: admin.role,
            is_registered: admin.is_registered,
        });
    }

    // Legacy fallback: compares the raw (trimmed) email, not the normalized
    // form, because the environment value is matched verbatim.
    if let Some(env_admin) = &state.env_admin {
        if env_admin.matches(email.trim(), password) {
            let token = mint_access_token(
                ENV_ADMIN_SUB,
                &env_admin.email,
                Role::Admin,
                true,
                std::time::SystemTime::now(),
                &state.security,
            )?;
            info!(trace_id = %trace_ctx::trace_id(), "environment-admin login");
            return Ok(AuthSession {
                token,
                name: None,
                email: env_admin.email.clone(),
                role: Role::Admin.as_str().to_string(),
                is_registered: true,
            });
        }
    }

    warn!(trace_id = %trace_ctx::trace_id(), email = %Redacted(&normalized), "login rejected: unknown identity");
    Err(AppError::invalid_credentials())
}

/// Create an admin record and log it straight in.
pub async fn register(
    state: &AppState,
    name: &str,
    email: &str,
    password: &str,
) -> Result<AuthSession, AppError> {
    if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        return Err(AppError::invalid(
            ErrorCode::ValidationError,
            "Name, email and password are required",
        ));
    }

    let normalized = normalize_email(email);
    let db = require_db(state)?;

    // Friendly duplicate check; the unique index stays authoritative under
    // concurrent registration and maps to the same conflict code.
    if admins::find_by_email(db, &normalized).await?.is_some() {
        return Err(AppError::from(DomainError::conflict(
            crate::errors::domain::ConflictKind::UniqueEmail,
            "Admin with this email already exists",
        )));
    }

    let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("password hashing failed: {e}")))?;

    let admin = admins::create(db, name.trim(), &normalized, &password_hash).await?;
    info!(trace_id = %trace_ctx::trace_id(), admin_id = %admin.id, "admin registered");

    let token = mint_access_token(
        &admin.id.to_string(),
        &admin.email,
        role_from_str(&admin.role),
        admin.is_registered,
        std::time::SystemTime::now(),
        &state.security,
    )?;

    Ok(AuthSession {
        token,
        name: Some(admin.name),
        email: admin.email,
        role: admin.role,
        is_registered: admin.is_registered,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_normalized() {
        assert_eq!(normalize_email("  Admin@Example.COM "), "admin@example.com");
    }

    #[test]
    fn unknown_roles_default_to_admin() {
        assert_eq!(role_from_str("admin"), Role::Admin);
        assert_eq!(role_from_str("user"), Role::User);
        assert_eq!(role_from_str("something-else"), Role::Admin);
    }
}
