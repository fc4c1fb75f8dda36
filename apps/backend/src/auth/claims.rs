//! JWT claims issued and verified by this backend.

use serde::{Deserialize, Serialize};

/// Role carried in a token. Only `Admin` is currently granted elevated
/// scopes; `User` exists for forward compatibility with the stored records.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

/// Claims included in backend-issued access tokens and inserted into request
/// extensions by the authentication middleware.
///
/// `role`, `email` and `is_registered` are informational snapshots from
/// issuance time; authorization decisions re-check live data and never trust
/// them alone.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AdminClaims {
    /// Subject: admin record id, or the `"admin"` environment-admin sentinel
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub is_registered: bool,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}
