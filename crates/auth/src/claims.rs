//! Token claims model, decoupled from any JWT library.

use chrono::{DateTime, Utc};
use mandir_core::{TenantId, UserId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims carried by a verified bearer token.
///
/// Tenant claims are kept as the raw wire values: issuers encode "no tenant"
/// as an absent field or as `0`, and neither form is an error. Accessors
/// normalize both to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject: the account this token was issued to.
    pub sub: UserId,

    /// Billing tenant of the subject, when issued with one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<u64>,

    /// Tenant an operational account (standard/monitoring) is assigned to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_tenant_id: Option<u64>,

    /// When the token was issued.
    pub issued_at: DateTime<Utc>,

    /// When the token stops being valid.
    pub expires_at: DateTime<Utc>,
}

impl AccessClaims {
    /// Billing tenant from claims: `tenant_id` first, then
    /// `assigned_tenant_id`. Zero-valued claims count as absent.
    pub fn tenant(&self) -> Option<TenantId> {
        self.tenant_id
            .and_then(TenantId::from_raw)
            .or_else(|| self.assigned_tenant())
    }

    /// The `assigned_tenant_id` claim when present and positive.
    pub fn assigned_tenant(&self) -> Option<TenantId> {
        self.assigned_tenant_id.and_then(TenantId::from_raw)
    }
}

/// Why a decoded token's claims were rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token is not valid yet")]
    NotYetValid,

    #[error("token validity window is empty")]
    EmptyWindow,
}

/// Validate the claim time window against a caller-supplied clock.
///
/// Taking `now` as a parameter keeps the check deterministic; signature
/// verification happens before this in the token verifier.
pub fn validate_claims(
    claims: &AccessClaims,
    now: DateTime<Utc>,
) -> Result<(), TokenValidationError> {
    if claims.expires_at <= claims.issued_at {
        return Err(TokenValidationError::EmptyWindow);
    }
    if now < claims.issued_at {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.expires_at {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use mandir_core::UserId;

    use super::*;

    fn claims_between(issued: DateTime<Utc>, expires: DateTime<Utc>) -> AccessClaims {
        AccessClaims {
            sub: UserId::from_raw(1).unwrap(),
            tenant_id: None,
            assigned_tenant_id: None,
            issued_at: issued,
            expires_at: expires,
        }
    }

    #[test]
    fn accepts_token_inside_window() {
        let now = Utc::now();
        let claims = claims_between(now - Duration::minutes(5), now + Duration::minutes(5));
        assert_eq!(validate_claims(&claims, now), Ok(()));
    }

    #[test]
    fn rejects_expired_token() {
        let now = Utc::now();
        let claims = claims_between(now - Duration::hours(2), now - Duration::hours(1));
        assert_eq!(validate_claims(&claims, now), Err(TokenValidationError::Expired));
    }

    #[test]
    fn expiry_instant_is_exclusive() {
        let now = Utc::now();
        let claims = claims_between(now - Duration::minutes(5), now);
        assert_eq!(validate_claims(&claims, now), Err(TokenValidationError::Expired));
    }

    #[test]
    fn rejects_token_from_the_future() {
        let now = Utc::now();
        let claims = claims_between(now + Duration::minutes(1), now + Duration::hours(1));
        assert_eq!(
            validate_claims(&claims, now),
            Err(TokenValidationError::NotYetValid)
        );
    }

    #[test]
    fn rejects_empty_window() {
        let now = Utc::now();
        let claims = claims_between(now, now);
        assert_eq!(
            validate_claims(&claims, now),
            Err(TokenValidationError::EmptyWindow)
        );
    }

    #[test]
    fn zero_tenant_claims_read_as_absent() {
        let now = Utc::now();
        let mut claims = claims_between(now, now + Duration::hours(1));
        claims.tenant_id = Some(0);
        claims.assigned_tenant_id = Some(0);
        assert_eq!(claims.tenant(), None);
        assert_eq!(claims.assigned_tenant(), None);
    }

    #[test]
    fn tenant_falls_back_to_assigned_tenant() {
        let now = Utc::now();
        let mut claims = claims_between(now, now + Duration::hours(1));
        claims.assigned_tenant_id = Some(42);
        assert_eq!(claims.tenant(), TenantId::from_raw(42));

        claims.tenant_id = Some(7);
        assert_eq!(claims.tenant(), TenantId::from_raw(7));
    }

    #[test]
    fn deserializes_with_missing_tenant_fields() {
        let json = r#"{
            "sub": 3,
            "issued_at": "2026-01-01T00:00:00Z",
            "expires_at": "2026-01-02T00:00:00Z"
        }"#;
        let claims: AccessClaims = serde_json::from_str(json).unwrap();
        assert_eq!(u64::from(claims.sub), 3);
        assert_eq!(claims.tenant_id, None);
        assert_eq!(claims.assigned_tenant_id, None);
    }
}
