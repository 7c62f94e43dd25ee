//! Bearer token verification.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use thiserror::Error;

use crate::claims::{AccessClaims, TokenValidationError, validate_claims};

/// Verifies a bearer token and surfaces its claims.
///
/// Object-safe so transports can hold `Arc<dyn TokenVerifier>`. The clock is
/// a parameter: verification is a pure function of token, key and `now`.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<AccessClaims, TokenError>;
}

/// Why a presented token was refused.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Signature, structure or claim shape rejected at the JWT layer.
    #[error("token rejected: {0}")]
    Decode(#[from] jsonwebtoken::errors::Error),

    /// Decoded fine, but the validity window does not admit `now`.
    #[error(transparent)]
    Window(#[from] TokenValidationError),
}

/// HS256 verifier over a shared secret.
pub struct Hs256TokenVerifier {
    key: DecodingKey,
}

impl Hs256TokenVerifier {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_ref()),
        }
    }
}

impl TokenVerifier for Hs256TokenVerifier {
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<AccessClaims, TokenError> {
        // The validity window lives in `issued_at`/`expires_at` and is checked
        // by `validate_claims`, so the JWT layer is limited to signature and
        // claim-shape checks.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = jsonwebtoken::decode::<AccessClaims>(token, &self.key, &validation)?;
        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use jsonwebtoken::{EncodingKey, Header};
    use serde_json::json;

    use super::*;

    const SECRET: &[u8] = b"verifier-test-secret";

    fn mint(claims: &serde_json::Value, secret: &[u8]) -> String {
        jsonwebtoken::encode(&Header::default(), claims, &EncodingKey::from_secret(secret))
            .unwrap()
    }

    fn valid_claims(now: DateTime<Utc>) -> serde_json::Value {
        json!({
            "sub": 11,
            "tenant_id": 4,
            "issued_at": now - Duration::minutes(1),
            "expires_at": now + Duration::hours(1),
        })
    }

    #[test]
    fn verifies_a_well_formed_token() {
        let now = Utc::now();
        let verifier = Hs256TokenVerifier::new(SECRET);
        let token = mint(&valid_claims(now), SECRET);

        let claims = verifier.verify(&token, now).unwrap();
        assert_eq!(u64::from(claims.sub), 11);
        assert_eq!(claims.tenant_id, Some(4));
    }

    #[test]
    fn rejects_wrong_signature() {
        let now = Utc::now();
        let verifier = Hs256TokenVerifier::new(SECRET);
        let token = mint(&valid_claims(now), b"some-other-secret");

        assert!(matches!(
            verifier.verify(&token, now),
            Err(TokenError::Decode(_))
        ));
    }

    #[test]
    fn rejects_garbage_input() {
        let verifier = Hs256TokenVerifier::new(SECRET);
        assert!(matches!(
            verifier.verify("not.a.token", Utc::now()),
            Err(TokenError::Decode(_))
        ));
    }

    #[test]
    fn rejects_expired_window() {
        let now = Utc::now();
        let verifier = Hs256TokenVerifier::new(SECRET);
        let token = mint(
            &json!({
                "sub": 11,
                "issued_at": now - Duration::hours(2),
                "expires_at": now - Duration::hours(1),
            }),
            SECRET,
        );

        assert!(matches!(
            verifier.verify(&token, now),
            Err(TokenError::Window(TokenValidationError::Expired))
        ));
    }

    #[test]
    fn rejects_unusable_subject() {
        // A zero subject deserializes to no account at all; the token is
        // structurally invalid rather than merely unauthorized.
        let now = Utc::now();
        let verifier = Hs256TokenVerifier::new(SECRET);
        let token = mint(
            &json!({
                "sub": 0,
                "issued_at": now - Duration::minutes(1),
                "expires_at": now + Duration::hours(1),
            }),
            SECRET,
        );

        assert!(matches!(
            verifier.verify(&token, now),
            Err(TokenError::Decode(_))
        ));
    }

    #[test]
    fn zero_tenant_claim_is_tolerated() {
        let now = Utc::now();
        let verifier = Hs256TokenVerifier::new(SECRET);
        let token = mint(
            &json!({
                "sub": 11,
                "tenant_id": 0,
                "issued_at": now - Duration::minutes(1),
                "expires_at": now + Duration::hours(1),
            }),
            SECRET,
        );

        let claims = verifier.verify(&token, now).unwrap();
        assert_eq!(claims.tenant_id, Some(0));
        assert_eq!(claims.tenant(), None);
    }
}
