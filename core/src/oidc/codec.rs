//! Compact token codec
//!
//! Splits `header.payload.signature` tokens into their decoded parts and
//! computes the digest of the signed message. No claim interpretation happens
//! here.

use base64::{engine::general_purpose::URL_SAFE, Engine};
use sha2::{Digest, Sha256};

use super::Rejection;

/// Borrowed view over the three base64url segments of a token
#[derive(Debug, Clone, Copy)]
pub struct CompactToken<'a> {
    header: &'a str,
    payload: &'a str,
    signature: &'a str,
}

/// Decoded token parts plus the SHA-256 digest of the signed message
#[derive(Debug)]
pub struct DecodedToken {
    pub header: Vec<u8>,
    pub payload: Vec<u8>,
    pub signature: Vec<u8>,
    pub signed_message: [u8; 32],
}

impl<'a> CompactToken<'a> {
    /// Split a token into exactly three dot-separated segments
    pub fn parse(token: &'a str) -> Result<Self, Rejection> {
        let mut parts = token.split('.');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(header), Some(payload), Some(signature), None) => Ok(Self {
                header,
                payload,
                signature,
            }),
            _ => Err(Rejection::Format("token must have exactly three segments")),
        }
    }

    /// Decode all three segments and digest the signed message
    pub fn decode(&self) -> Result<DecodedToken, Rejection> {
        Ok(DecodedToken {
            header: decode_segment(self.header)?,
            payload: decode_segment(self.payload)?,
            signature: decode_segment(self.signature)?,
            signed_message: signed_message_digest(self.header, self.payload),
        })
    }
}

/// Split and decode a token in one step
pub fn split(token: &str) -> Result<DecodedToken, Rejection> {
    CompactToken::parse(token)?.decode()
}

/// Decode a base64url segment, restoring omitted `=` padding first
pub fn decode_segment(segment: &str) -> Result<Vec<u8>, Rejection> {
    let padding = match segment.len() % 4 {
        0 => 0,
        1 => return Err(Rejection::Format("segment length is not valid base64url")),
        remainder => 4 - remainder,
    };

    let mut padded = String::with_capacity(segment.len() + padding);
    padded.push_str(segment);
    padded.extend(std::iter::repeat('=').take(padding));

    URL_SAFE
        .decode(padded)
        .map_err(|_| Rejection::Format("segment is not valid base64url"))
}

/// SHA-256 over the original text `"<header>.<payload>"`
pub fn signed_message_digest(header: &str, payload: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(header.as_bytes());
    hasher.update(b".");
    hasher.update(payload.as_bytes());
    hasher.finalize().into()
}
