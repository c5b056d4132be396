//! Identity token claims

use serde::Deserialize;

use super::Rejection;

/// Payload fields that trust decisions depend on
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClaimSet {
    /// Subject
    pub sub: String,

    /// Audience (the client the token was issued for)
    pub aud: String,

    /// Issuer
    pub iss: String,

    /// Issued at (Unix seconds)
    pub iat: i64,

    /// Expiration time (Unix seconds)
    pub exp: i64,
}

impl ClaimSet {
    /// Decode claims from the raw payload bytes
    ///
    /// Malformed JSON, a missing claim, or an empty subject rejects the token
    /// outright instead of falling through with zero values.
    pub fn from_payload(payload: &[u8]) -> Result<Self, Rejection> {
        let claims: ClaimSet = serde_json::from_slice(payload)
            .map_err(|_| Rejection::Format("payload is not a valid claim set"))?;

        if claims.sub.is_empty() {
            return Err(Rejection::Format("subject cannot be empty"));
        }

        Ok(claims)
    }

    /// `iat <= now <= exp`, both bounds inclusive
    pub fn is_current(&self, now: i64) -> bool {
        self.iat <= now && now <= self.exp
    }
}
