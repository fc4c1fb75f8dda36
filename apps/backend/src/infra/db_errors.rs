//! SeaORM -> DomainError translation.
//!
//! Repos convert `sea_orm::DbErr` into `crate::errors::domain::DomainError`
//! here; handlers then map `DomainError` to `AppError` via `From`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::logging::pii::Redacted;
use crate::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Extract table.column from SQLite "UNIQUE constraint failed: table.column"
/// messages.
fn extract_sqlite_table_column(error_msg: &str) -> Option<&str> {
    let prefix = "UNIQUE constraint failed: ";
    let start = error_msg.find(prefix)?;
    error_msg[start + prefix.len()..].split_whitespace().next()
}

fn unique_conflict_for(error_msg: &str) -> (ConflictKind, &'static str) {
    // SQLite reports the column, Postgres the constraint name
    if extract_sqlite_table_column(error_msg) == Some("admins.email")
        || error_msg.contains("admins_email_key")
    {
        return (ConflictKind::UniqueEmail, "Email already registered");
    }
    (
        ConflictKind::Other("Unique".into()),
        "Unique constraint violation",
    )
}

/// Translate a `DbErr` into a `DomainError` with sanitized, PII-safe detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(NotFoundKind::Other("Record".into()), "Record not found");
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unique constraint violation");
        let (kind, detail) = unique_conflict_for(&error_msg);
        return DomainError::conflict(kind, detail);
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Foreign key constraint violation");
        return DomainError::validation("Foreign key constraint violation");
    }

    if mentions_sqlstate(&error_msg, "23514") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Check constraint violation");
        return DomainError::validation("Check constraint violation");
    }

    if error_msg.contains("timeout") || error_msg.contains("pool") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database timeout or pool issue");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_unique_email_maps_to_unique_email_conflict() {
        let err = sea_orm::DbErr::Custom(
            "Execution Error: UNIQUE constraint failed: admins.email".into(),
        );
        match map_db_err(err) {
            DomainError::Conflict(ConflictKind::UniqueEmail, _) => {}
            other => panic!("expected UniqueEmail conflict, got {other:?}"),
        }
    }

    #[test]
    fn postgres_unique_email_maps_to_unique_email_conflict() {
        let err = sea_orm::DbErr::Custom(
            "duplicate key value violates unique constraint \"admins_email_key\"".into(),
        );
        match map_db_err(err) {
            DomainError::Conflict(ConflictKind::UniqueEmail, _) => {}
            other => panic!("expected UniqueEmail conflict, got {other:?}"),
        }
    }

    #[test]
    fn unknown_unique_violation_is_generic_conflict() {
        let err = sea_orm::DbErr::Custom("UNIQUE constraint failed: blogs.slug".into());
        match map_db_err(err) {
            DomainError::Conflict(ConflictKind::Other(_), _) => {}
            other => panic!("expected generic conflict, got {other:?}"),
        }
    }

    #[test]
    fn record_not_found_maps_to_not_found() {
        let err = sea_orm::DbErr::RecordNotFound("blogs".into());
        match map_db_err(err) {
            DomainError::NotFound(NotFoundKind::Other(_), _) => {}
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn unclassified_errors_are_infra() {
        let err = sea_orm::DbErr::Custom("something exploded".into());
        match map_db_err(err) {
            DomainError::Infra(InfraErrorKind::Other(_), _) => {}
            other => panic!("expected Infra, got {other:?}"),
        }
    }
}
