//! Token codec: a pure mint/verify pair over [`AdminClaims`].

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::auth::claims::{AdminClaims, Role};
use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

/// Fixed token lifetime: one hour from issuance.
pub const TOKEN_TTL_SECS: i64 = 60 * 60;

/// Mint an HS256 JWT access token with a 1-hour TTL.
pub fn mint_access_token(
    sub: &str,
    email: &str,
    role: Role,
    is_registered: bool,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time".to_string()))?
        .as_secs() as i64;

    let claims = AdminClaims {
        sub: sub.to_string(),
        email: email.to_string(),
        role,
        is_registered,
        iat,
        exp: iat + TOKEN_TTL_SECS,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify a JWT and return its claims.
///
/// Errors:
/// - Expired token (signature otherwise valid) → `UnauthorizedExpiredJwt`
/// - Anything else (bad signature, garbage input) → `UnauthorizedInvalidJwt`
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<AdminClaims, AppError> {
    let mut validation = Validation::new(security.algorithm);
    // No clock tolerance: one second past exp is expired.
    validation.leeway = 0;

    decode::<AdminClaims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::unauthorized_expired_jwt(),
        _ => AppError::unauthorized_invalid_jwt(),
    })
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use super::{mint_access_token, verify_access_token, TOKEN_TTL_SECS};
    use crate::auth::claims::Role;
    use crate::error::AppError;
    use crate::state::security_config::SecurityConfig;

    fn test_security() -> SecurityConfig {
        SecurityConfig::new("test_secret_key_for_testing_purposes_only".as_bytes())
    }

    #[test]
    fn test_mint_and_verify_roundtrip() {
        let security = test_security();
        let now = SystemTime::now();

        let token = mint_access_token(
            "subject-roundtrip-123",
            "admin@example.test",
            Role::Admin,
            true,
            now,
            &security,
        )
        .unwrap();
        let claims = verify_access_token(&token, &security).unwrap();

        assert_eq!(claims.sub, "subject-roundtrip-123");
        assert_eq!(claims.email, "admin@example.test");
        assert_eq!(claims.role, Role::Admin);
        assert!(claims.is_registered);
        assert_eq!(
            claims.iat,
            now.duration_since(UNIX_EPOCH).unwrap().as_secs() as i64
        );
        assert_eq!(claims.exp, claims.iat + TOKEN_TTL_SECS);
    }

    #[test]
    fn test_expired_token_is_distinguishable() {
        let security = test_security();
        // Two hours ago, so the 1-hour token is well past its exp and
        // outside jsonwebtoken's default leeway.
        let now = SystemTime::now() - Duration::from_secs(2 * 60 * 60);

        let token = mint_access_token(
            "subject-expired-456",
            "admin@example.test",
            Role::Admin,
            false,
            now,
            &security,
        )
        .unwrap();

        match verify_access_token(&token, &security) {
            Err(AppError::UnauthorizedExpiredJwt) => {}
            other => panic!("Expected expired variant, got {other:?}"),
        }
    }

    #[test]
    fn test_expiry_boundary_has_no_leeway() {
        let security = test_security();

        // One second past exp: rejected as expired
        let now = SystemTime::now() - Duration::from_secs(TOKEN_TTL_SECS as u64 + 1);
        let token = mint_access_token(
            "subject-boundary-1",
            "admin@example.test",
            Role::Admin,
            true,
            now,
            &security,
        )
        .unwrap();
        match verify_access_token(&token, &security) {
            Err(AppError::UnauthorizedExpiredJwt) => {}
            other => panic!("Expected expired variant at exp+1s, got {other:?}"),
        }

        // One second before exp: still valid
        let now = SystemTime::now() - Duration::from_secs(TOKEN_TTL_SECS as u64 - 1);
        let token = mint_access_token(
            "subject-boundary-2",
            "admin@example.test",
            Role::Admin,
            true,
            now,
            &security,
        )
        .unwrap();
        assert!(verify_access_token(&token, &security).is_ok());
    }

    #[test]
    fn test_wrong_secret_is_invalid_not_expired() {
        let security_a = SecurityConfig::new("secret-A".as_bytes());
        let security_b = SecurityConfig::new("secret-B".as_bytes());

        let token = mint_access_token(
            "subject-bad-sig-789",
            "admin@example.test",
            Role::Admin,
            true,
            SystemTime::now(),
            &security_a,
        )
        .unwrap();

        match verify_access_token(&token, &security_b) {
            Err(AppError::UnauthorizedInvalidJwt) => {}
            other => panic!("Expected invalid variant, got {other:?}"),
        }
    }

    #[test]
    fn test_garbage_tokens_are_invalid() {
        let security = test_security();
        for garbage in ["", "not-a-token", "aaaa.bbbb.cccc"] {
            match verify_access_token(garbage, &security) {
                Err(AppError::UnauthorizedInvalidJwt) => {}
                other => panic!("Expected invalid variant for {garbage:?}, got {other:?}"),
            }
        }
    }
}
