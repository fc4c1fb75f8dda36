use sea_orm::DatabaseConnection;

use crate::error::AppError;
use crate::state::app_state::AppState;

/// Canonical way to reach the database from handlers and services.
///
/// Returns a borrowed connection, or `AppError::db_unavailable()` when the
/// state was built without one.
pub fn require_db(state: &AppState) -> Result<&DatabaseConnection, AppError> {
    state.db().ok_or_else(AppError::db_unavailable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::security_config::SecurityConfig;

    #[test]
    fn require_db_fails_without_db() {
        let app_state = AppState::new_without_db(SecurityConfig::default());
        assert!(matches!(require_db(&app_state), Err(AppError::DbUnavailable)));
    }
}
