//! OIDC token validation
//!
//! Validates identity tokens by checking claims and verifying signatures.

use super::claims::ClaimSet;
use super::codec;
use super::jwks::KeySet;
use super::signature;
use super::Rejection;

/// Issuer values Google puts in its ID tokens
pub const GOOGLE_ISSUERS: &[&str] = &["accounts.google.com", "https://accounts.google.com"];

/// Validates identity tokens against a fixed key set and audience
///
/// Holds no mutable state; `validate` can be called concurrently.
#[derive(Debug, Clone)]
pub struct TokenValidator {
    keys: KeySet,
    audience: String,
    issuers: Vec<String>,
}

impl TokenValidator {
    pub fn new(keys: KeySet, audience: impl Into<String>, issuers: &[&str]) -> Self {
        Self {
            keys,
            audience: audience.into(),
            issuers: issuers.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Validator for Google ID tokens issued to `client_id`
    pub fn google(keys: KeySet, client_id: impl Into<String>) -> Self {
        Self::new(keys, client_id, GOOGLE_ISSUERS)
    }

    pub fn keys(&self) -> &KeySet {
        &self.keys
    }

    /// Validate a token at `now` (Unix seconds) and return its subject
    ///
    /// Checks run in order: format, audience, issuer, validity window,
    /// signature. The first failure is returned.
    pub fn validate(&self, token: &str, now: u64) -> Result<String, Rejection> {
        let decoded = codec::split(token)?;

        let claims = ClaimSet::from_payload(&decoded.payload)?;

        if claims.aud != self.audience {
            return Err(Rejection::AudienceMismatch);
        }

        if !self.issuers.iter().any(|iss| *iss == claims.iss) {
            return Err(Rejection::IssuerInvalid);
        }

        let now = i64::try_from(now).unwrap_or(i64::MAX);
        if !claims.is_current(now) {
            return Err(Rejection::TokenExpired);
        }

        if !signature::verify(&decoded.signed_message, &decoded.signature, &self.keys) {
            return Err(Rejection::SignatureInvalid);
        }

        Ok(claims.sub)
    }
}
