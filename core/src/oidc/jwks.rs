//! JWKS (JSON Web Key Set) handling
//!
//! Fetches the provider's published signing keys and turns each RSA record
//! into a verification key.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use jsonwebtoken::jwk::{AlgorithmParameters, Jwk};
use rsa::{BigUint, Pkcs1v15Sign, RsaPublicKey};
use serde::Deserialize;
use sha2::Sha256;
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::{ApiError, Result};
use crate::platform::HttpClient;

/// Google's published OAuth2 signing certificates
pub const GOOGLE_CERTS_URL: &str = "https://www.googleapis.com/oauth2/v3/certs";

/// Why a single key record was skipped
#[derive(Error, Debug)]
pub enum KeyRecordError {
    #[error("malformed key record: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("not an RSA key")]
    NotRsa,

    #[error("invalid key component encoding: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("invalid RSA key: {0}")]
    InvalidKey(#[from] rsa::Error),
}

/// An RSA public key the provider signs identity tokens with
#[derive(Debug, Clone)]
pub struct SigningKey {
    key_id: Option<String>,
    key: RsaPublicKey,
}

impl SigningKey {
    pub fn new(key_id: Option<String>, key: RsaPublicKey) -> Self {
        Self { key_id, key }
    }

    /// Build a signing key from a JWK record
    pub fn from_jwk(jwk: &Jwk) -> std::result::Result<Self, KeyRecordError> {
        let AlgorithmParameters::RSA(params) = &jwk.algorithm else {
            return Err(KeyRecordError::NotRsa);
        };

        let n = BigUint::from_bytes_be(&URL_SAFE_NO_PAD.decode(params.n.trim_end_matches('='))?);
        let e = BigUint::from_bytes_be(&URL_SAFE_NO_PAD.decode(params.e.trim_end_matches('='))?);

        Ok(Self {
            key_id: jwk.common.key_id.clone(),
            key: RsaPublicKey::new(n, e)?,
        })
    }

    pub fn key_id(&self) -> Option<&str> {
        self.key_id.as_deref()
    }

    /// RSA PKCS#1 v1.5 check of a SHA-256 digest against `signature`
    pub fn verify(&self, digest: &[u8], signature: &[u8]) -> bool {
        self.key
            .verify(Pkcs1v15Sign::new::<Sha256>(), digest, signature)
            .is_ok()
    }
}

/// Ordered set of signing keys, unique by key material
#[derive(Debug, Clone, Default)]
pub struct KeySet {
    keys: Vec<SigningKey>,
}

impl KeySet {
    pub fn new(keys: impl IntoIterator<Item = SigningKey>) -> Self {
        let mut unique: Vec<SigningKey> = Vec::new();
        for key in keys {
            if !unique.iter().any(|existing| existing.key == key.key) {
                unique.push(key);
            }
        }
        Self { keys: unique }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SigningKey> {
        self.keys.iter()
    }

    /// Parse a `{"keys": [...]}` document, skipping records that are not
    /// usable RSA keys
    pub fn from_json(body: &[u8]) -> std::result::Result<Self, serde_json::Error> {
        #[derive(Deserialize)]
        struct Document {
            keys: Vec<serde_json::Value>,
        }

        let document: Document = serde_json::from_slice(body)?;

        let keys = document.keys.into_iter().filter_map(|record| {
            let parsed = serde_json::from_value::<Jwk>(record)
                .map_err(KeyRecordError::from)
                .and_then(|jwk| SigningKey::from_jwk(&jwk));
            match parsed {
                Ok(key) => Some(key),
                Err(e) => {
                    warn!(error = %e, "skipping key record");
                    None
                }
            }
        });

        Ok(Self::new(keys))
    }
}

/// Fetch the current key set from a certs endpoint
///
/// Fails if the endpoint is unreachable, answers with a non-200 status or an
/// unparseable document, or publishes no usable RSA key.
pub async fn fetch_keys(certs_url: &str, http: &dyn HttpClient) -> Result<KeySet> {
    let response = http
        .get(
            certs_url,
            &[
                ("Accept", "application/json"),
                ("User-Agent", "socialauth-rust"),
            ],
        )
        .await
        .map_err(|e| ApiError::key_source_unavailable(format!("failed to fetch keys: {}", e)))?;

    if response.status != 200 {
        return Err(ApiError::key_source_unavailable(format!(
            "failed to fetch keys: HTTP {}",
            response.status
        )));
    }

    let keys = KeySet::from_json(&response.body)
        .map_err(|e| ApiError::key_source_unavailable(format!("invalid key document: {}", e)))?;

    if keys.is_empty() {
        return Err(ApiError::key_source_unavailable(
            "key document contains no usable RSA keys",
        ));
    }

    debug!(count = keys.len(), url = certs_url, "fetched signing keys");
    Ok(keys)
}
