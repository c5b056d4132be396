//! OIDC identity token verification
//!
//! Decodes compact tokens, checks claims, and verifies RS256 signatures against
//! the provider's published keys.

pub mod claims;
pub mod codec;
pub mod jwks;
pub mod signature;
mod validate;

use thiserror::Error;

pub use claims::ClaimSet;
pub use jwks::{fetch_keys, KeySet, SigningKey, GOOGLE_CERTS_URL};
pub use validate::{TokenValidator, GOOGLE_ISSUERS};

/// Why a token was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("invalid token format: {0}")]
    Format(&'static str),

    #[error("audience does not match the configured client")]
    AudienceMismatch,

    #[error("issuer is not accepted")]
    IssuerInvalid,

    #[error("token is expired or not yet valid")]
    TokenExpired,

    #[error("signature does not match any published key")]
    SignatureInvalid,
}
