//! Access-token claim inspection.
//!
//! The client never verifies token signatures; the server does. What it
//! needs locally is the expiry claim, to refresh *before* a token dies
//! rather than eating a 401 mid-flow.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The claims this client reads off an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (username), when present.
    #[serde(default)]
    pub sub: Option<String>,

    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,

    /// Issued-at, seconds since the Unix epoch.
    #[serde(default)]
    pub iat: Option<i64>,
}

impl AccessClaims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClaimsError {
    #[error("malformed access token: {0}")]
    Malformed(String),

    #[error("access token expiry out of range")]
    ExpiryOutOfRange,
}

/// Decode a token's claims without verifying its signature.
///
/// Inspection only: nothing read here is trusted for authorization.
pub fn peek_claims(token: &str) -> Result<AccessClaims, ClaimsError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    decode::<AccessClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|e| ClaimsError::Malformed(e.to_string()))
}

/// Whether `token` expires within `window` of `now` (and has not already
/// expired; an expired token is the 401 path's problem, not the proactive
/// refresh's).
pub fn expires_within(
    token: &str,
    window: Duration,
    now: DateTime<Utc>,
) -> Result<bool, ClaimsError> {
    let claims = peek_claims(token)?;
    let expires_at = claims.expires_at().ok_or(ClaimsError::ExpiryOutOfRange)?;
    let remaining = expires_at.signed_duration_since(now);
    Ok(remaining > Duration::zero() && remaining < window)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    fn mint(exp: DateTime<Utc>) -> String {
        let claims = AccessClaims {
            sub: Some("alice".to_string()),
            exp: exp.timestamp(),
            iat: Some(Utc::now().timestamp()),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .expect("failed to encode jwt")
    }

    #[test]
    fn peeks_claims_without_knowing_the_secret() {
        let now = Utc::now();
        let token = mint(now + Duration::minutes(10));

        let claims = peek_claims(&token).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("alice"));
        assert_eq!(claims.expires_at().unwrap().timestamp(), (now + Duration::minutes(10)).timestamp());
    }

    #[test]
    fn expiring_soon_is_inside_the_window() {
        let now = Utc::now();
        let token = mint(now + Duration::seconds(90));
        assert!(expires_within(&token, Duration::minutes(2), now).unwrap());
    }

    #[test]
    fn fresh_token_is_outside_the_window() {
        let now = Utc::now();
        let token = mint(now + Duration::minutes(10));
        assert!(!expires_within(&token, Duration::minutes(2), now).unwrap());
    }

    #[test]
    fn already_expired_token_is_not_proactively_refreshable() {
        let now = Utc::now();
        let token = mint(now - Duration::minutes(1));
        assert!(!expires_within(&token, Duration::minutes(2), now).unwrap());
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(
            peek_claims("not-a-jwt"),
            Err(ClaimsError::Malformed(_))
        ));
    }
}
