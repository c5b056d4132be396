//! Authentication providers
//!
//! Every provider answers one question: is this token authentic, and for whom.
//! Providers are registered explicitly under their identifier.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::platform::{Clock, HttpClient};

mod facebook;
mod google;

pub use facebook::FacebookAuthProvider;
pub use google::GoogleAuthProvider;

/// Token verification contract shared by all providers
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Stable lowercase name used for lookup
    fn identifier(&self) -> &str;

    /// Verify a token and return the provider's user ID
    async fn verify_token(&self, token: &str) -> Result<String>;
}

/// Configured providers keyed by identifier
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn AuthProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider under its identifier
    pub fn register(&mut self, provider: Arc<dyn AuthProvider>) -> Result<()> {
        let identifier = provider.identifier().to_ascii_lowercase();
        if self.providers.contains_key(&identifier) {
            return Err(ApiError::internal(format!(
                "provider '{}' is already registered",
                identifier
            )));
        }
        self.providers.insert(identifier, provider);
        Ok(())
    }

    /// Look up a provider by name, ignoring case
    pub fn get(&self, name: &str) -> Option<Arc<dyn AuthProvider>> {
        self.providers.get(&name.to_ascii_lowercase()).cloned()
    }

    pub fn identifiers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.providers.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

/// Providers built from configuration
pub struct ConfiguredProviders {
    pub registry: ProviderRegistry,
    /// Kept separately so the host can schedule key refreshes
    pub google: Option<Arc<GoogleAuthProvider>>,
}

/// Build and register every provider the configuration enables
///
/// Fails if Google is enabled but its signing keys cannot be fetched.
pub async fn configure(
    config: &Config,
    http: Arc<dyn HttpClient>,
    clock: Arc<dyn Clock>,
) -> Result<ConfiguredProviders> {
    let mut registry = ProviderRegistry::new();
    let mut google = None;

    if let Some(client_id) = &config.google_client_id {
        let provider = Arc::new(
            GoogleAuthProvider::with_certs_url(
                client_id.clone(),
                config.google_certs_url.clone(),
                http.clone(),
                clock.clone(),
            )
            .await?,
        );
        registry.register(provider.clone())?;
        google = Some(provider);
    }

    if let Some(app_token) = &config.facebook_app_access_token {
        registry.register(Arc::new(FacebookAuthProvider::new(app_token.clone(), http.clone())))?;
    }

    info!(providers = ?registry.identifiers(), "authentication providers configured");

    Ok(ConfiguredProviders { registry, google })
}
