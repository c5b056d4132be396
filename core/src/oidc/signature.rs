//! Signature verification against a rotating key set

use super::jwks::KeySet;

/// Try each key in order; true on the first that verifies `signature`
/// over `digest`. An empty key set never matches.
pub fn verify(digest: &[u8], signature: &[u8], keys: &KeySet) -> bool {
    keys.iter().any(|key| key.verify(digest, signature))
}
