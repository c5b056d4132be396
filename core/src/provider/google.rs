//! Google Sign-In provider
//!
//! Verifies Google ID tokens locally against Google's published keys.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::AuthProvider;
use crate::error::{ApiError, Result};
use crate::oidc::{fetch_keys, KeySet, TokenValidator, GOOGLE_CERTS_URL};
use crate::platform::{Clock, HttpClient};

/// Google ID token provider
///
/// The validator is an immutable snapshot; `refresh_keys` replaces it
/// wholesale.
pub struct GoogleAuthProvider {
    client_id: String,
    certs_url: String,
    http: Arc<dyn HttpClient>,
    clock: Arc<dyn Clock>,
    validator: RwLock<Arc<TokenValidator>>,
}

impl GoogleAuthProvider {
    /// Create a provider for `client_id`, fetching Google's current keys
    pub async fn new(
        client_id: impl Into<String>,
        http: Arc<dyn HttpClient>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        Self::with_certs_url(client_id, GOOGLE_CERTS_URL, http, clock).await
    }

    /// Create a provider that reads keys from a custom certs endpoint
    pub async fn with_certs_url(
        client_id: impl Into<String>,
        certs_url: impl Into<String>,
        http: Arc<dyn HttpClient>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let certs_url = certs_url.into();
        let keys = fetch_keys(&certs_url, http.as_ref()).await?;
        Ok(Self::with_keys(client_id, certs_url, keys, http, clock))
    }

    /// Create a provider from an already fetched key set
    pub fn with_keys(
        client_id: impl Into<String>,
        certs_url: impl Into<String>,
        keys: KeySet,
        http: Arc<dyn HttpClient>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let client_id = client_id.into();
        let validator = TokenValidator::google(keys, client_id.clone());
        Self {
            client_id,
            certs_url: certs_url.into(),
            http,
            clock,
            validator: RwLock::new(Arc::new(validator)),
        }
    }

    /// Current validator snapshot
    pub async fn validator(&self) -> Arc<TokenValidator> {
        self.validator.read().await.clone()
    }

    /// Fetch the current keys and swap in a fresh validator
    ///
    /// On failure the previous keys stay in place. Returns the new key count.
    pub async fn refresh_keys(&self) -> Result<usize> {
        let keys = fetch_keys(&self.certs_url, self.http.as_ref()).await?;
        let count = keys.len();
        let validator = Arc::new(TokenValidator::google(keys, self.client_id.clone()));
        *self.validator.write().await = validator;
        info!(count, "refreshed google signing keys");
        Ok(count)
    }
}

#[async_trait]
impl AuthProvider for GoogleAuthProvider {
    fn identifier(&self) -> &str {
        "google"
    }

    async fn verify_token(&self, token: &str) -> Result<String> {
        let validator = self.validator().await;
        validator
            .validate(token, self.clock.now_secs())
            .map_err(|reason| {
                debug!(%reason, "google token rejected");
                ApiError::from(reason)
            })
    }
}
