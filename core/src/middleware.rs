//! Request authentication
//!
//! Reads the provider name and token from request headers, verifies the token
//! with the matching provider, and records the authenticated user in the
//! request extensions.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{ApiError, Result};
use crate::provider::ProviderRegistry;

/// Header naming the provider that issued the token
pub const PROVIDER_HEADER: &str = "x-auth-provider";

/// Header carrying the token itself
pub const TOKEN_HEADER: &str = "x-auth-token";

/// Body sent with every authentication failure
pub const FORBIDDEN_BODY: &str = "403 Forbidden\n";

/// Authenticated caller, stored in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub provider: String,
    pub user_id: String,
}

/// Verifies requests against the configured providers
#[derive(Clone)]
pub struct AuthMiddleware {
    registry: Arc<ProviderRegistry>,
}

impl AuthMiddleware {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self { registry }
    }

    /// Authenticate a request
    ///
    /// On success the returned user is also inserted into the request
    /// extensions. Callers must answer every error with the same 403
    /// response; the error is for server-side logging only.
    pub async fn authenticate<B>(&self, req: &mut http::Request<B>) -> Result<AuthenticatedUser> {
        let provider_name = header_value(req.headers(), PROVIDER_HEADER)?;
        let token = header_value(req.headers(), TOKEN_HEADER)?;

        let provider = self
            .registry
            .get(&provider_name)
            .ok_or_else(|| ApiError::unknown_provider(provider_name.clone()))?;

        let user_id = provider.verify_token(&token).await.map_err(|e| {
            warn!(provider = provider.identifier(), error = %e, "authentication failed");
            e
        })?;

        debug!(provider = provider.identifier(), user_id = %user_id, "authenticated request");

        let user = AuthenticatedUser {
            provider: provider.identifier().to_string(),
            user_id,
        };
        req.extensions_mut().insert(user.clone());
        Ok(user)
    }
}

fn header_value(headers: &http::HeaderMap, name: &str) -> Result<String> {
    let value = headers
        .get(name)
        .ok_or_else(|| ApiError::invalid_request(format!("missing {} header", name)))?
        .to_str()
        .map_err(|_| ApiError::invalid_request(format!("invalid {} header encoding", name)))?;

    if value.is_empty() {
        return Err(ApiError::invalid_request(format!("empty {} header", name)));
    }

    Ok(value.to_string())
}
