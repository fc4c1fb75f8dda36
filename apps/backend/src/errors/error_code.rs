//! Error codes for the blog backend API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the blog backend API.
///
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string that appears
/// in HTTP responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Authentication required
    Unauthorized,
    /// Missing or malformed Authorization header
    UnauthorizedMissingBearer,
    /// Invalid JWT token
    UnauthorizedInvalidJwt,
    /// JWT token has expired
    UnauthorizedExpiredJwt,
    /// Wrong email or password at login
    InvalidCredentials,
    /// Access denied
    Forbidden,
    /// Token subject no longer resolves to an admin record
    ForbiddenAdminNotFound,

    // Request Validation
    /// General validation error
    ValidationError,
    /// Blog id is not a valid UUID
    InvalidBlogId,
    /// Comment id is not a valid UUID
    InvalidCommentId,

    // Resource Not Found
    /// Blog not found
    BlogNotFound,
    /// Comment not found
    CommentNotFound,
    /// Admin not found
    AdminNotFound,
    /// Record not found (generic 404 for DB-driven not-found)
    RecordNotFound,

    // Business Logic Conflicts
    /// An admin with this email already exists
    UniqueEmail,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Content generation is not configured
    AiUnavailable,
    /// Content generation failed upstream
    AiGenerationFailed,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    ///
    /// This is the exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden => "FORBIDDEN",
            Self::ForbiddenAdminNotFound => "FORBIDDEN_ADMIN_NOT_FOUND",

            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidBlogId => "INVALID_BLOG_ID",
            Self::InvalidCommentId => "INVALID_COMMENT_ID",

            Self::BlogNotFound => "BLOG_NOT_FOUND",
            Self::CommentNotFound => "COMMENT_NOT_FOUND",
            Self::AdminNotFound => "ADMIN_NOT_FOUND",
            Self::RecordNotFound => "RECORD_NOT_FOUND",

            Self::UniqueEmail => "UNIQUE_EMAIL",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::AiUnavailable => "AI_UNAVAILABLE",
            Self::AiGenerationFailed => "AI_GENERATION_FAILED",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::ErrorCode;

    #[test]
    fn codes_are_screaming_snake_case() {
        let codes = [
            ErrorCode::Unauthorized,
            ErrorCode::UnauthorizedExpiredJwt,
            ErrorCode::InvalidCredentials,
            ErrorCode::ForbiddenAdminNotFound,
            ErrorCode::BlogNotFound,
            ErrorCode::UniqueEmail,
            ErrorCode::AiGenerationFailed,
        ];
        for code in codes {
            let s = code.as_str();
            assert!(
                s.chars().all(|c| c.is_ascii_uppercase() || c == '_'),
                "code {s} is not SCREAMING_SNAKE_CASE"
            );
        }
    }
}
