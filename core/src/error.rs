//! Error types

use thiserror::Error;

use crate::oidc::Rejection;

/// Result type alias for authentication operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// Authentication and configuration errors
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("unknown provider: {name}")]
    UnknownProvider { name: String },

    #[error("token rejected: {reason}")]
    TokenRejected { reason: Rejection },

    #[error("token verification failed: {message}")]
    TokenVerificationFailed { message: String },

    #[error("signing keys unavailable: {message}")]
    KeySourceUnavailable { message: String },

    #[error("internal error: {message}")]
    Internal { message: String },

    #[error("upstream error: {message}")]
    UpstreamError { message: String },

    #[error("upstream timeout")]
    UpstreamTimeout,
}

impl ApiError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    pub fn unknown_provider(name: impl Into<String>) -> Self {
        Self::UnknownProvider { name: name.into() }
    }

    pub fn token_verification_failed(message: impl Into<String>) -> Self {
        Self::TokenVerificationFailed {
            message: message.into(),
        }
    }

    pub fn key_source_unavailable(message: impl Into<String>) -> Self {
        Self::KeySourceUnavailable {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn upstream_error(message: impl Into<String>) -> Self {
        Self::UpstreamError {
            message: message.into(),
        }
    }

    /// The validation rejection behind this error, if any
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::TokenRejected { reason } => Some(reason),
            _ => None,
        }
    }
}

impl From<Rejection> for ApiError {
    fn from(reason: Rejection) -> Self {
        Self::TokenRejected { reason }
    }
}
