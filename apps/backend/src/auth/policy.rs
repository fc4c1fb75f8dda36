//! Authorization policy: ownership and scope decisions.
//!
//! Pure functions over a resolved [`Subject`] and a resource's stored author
//! id. The two identity paths (environment admin vs registered admin) are a
//! tagged union so the unconditional-privilege branch is handled explicitly
//! at every decision point rather than by sentinel string comparisons
//! scattered across handlers.

use crate::error::AppError;

/// Token subject reserved for the environment-admin account. Never a valid
/// admin record id.
pub const ENV_ADMIN_SUB: &str = "admin";

/// A resolved identity, as seen by authorization decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subject {
    /// The single operator account configured outside the credential store.
    /// Unconditionally authorized for every operation and resource.
    EnvAdmin,
    /// A credential-store admin, identified by its record id. Authorized
    /// only for resources it authored.
    Registered(String),
}

impl Subject {
    pub fn from_sub(sub: &str) -> Self {
        if sub == ENV_ADMIN_SUB {
            Subject::EnvAdmin
        } else {
            Subject::Registered(sub.to_string())
        }
    }

    /// The subject id as stored on resources this identity creates.
    pub fn id(&self) -> &str {
        match self {
            Subject::EnvAdmin => ENV_ADMIN_SUB,
            Subject::Registered(id) => id,
        }
    }
}

/// Which resources a subject may see in listing operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnerScope {
    /// Every resource, regardless of author.
    Global,
    /// Only resources whose author id equals this subject id.
    Owned(String),
}

pub fn owner_scope(subject: &Subject) -> OwnerScope {
    match subject {
        Subject::EnvAdmin => OwnerScope::Global,
        Subject::Registered(id) => OwnerScope::Owned(id.clone()),
    }
}

/// Decide whether `subject` may act on a resource authored by `owner_id`.
///
/// A missing author id (data anomaly) is owned by no one: every registered
/// subject is denied, never default-permitted.
pub fn authorize(subject: &Subject, owner_id: Option<&str>) -> bool {
    match subject {
        Subject::EnvAdmin => true,
        Subject::Registered(id) => owner_id == Some(id.as_str()),
    }
}

/// Ownership check for mutations; `Forbidden` on deny.
///
/// Callers must have established the resource exists first, so a failure
/// here always means "known identity, not entitled".
pub fn require_owner(subject: &Subject, owner_id: Option<&str>) -> Result<(), AppError> {
    if authorize(subject, owner_id) {
        Ok(())
    } else {
        Err(AppError::forbidden())
    }
}
