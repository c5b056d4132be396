//! Facebook Login provider
//!
//! Facebook access tokens are opaque, so verification is delegated to the
//! Graph API `debug_token` endpoint.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use super::AuthProvider;
use crate::error::{ApiError, Result};
use crate::platform::HttpClient;

const DEBUG_TOKEN_URL: &str = "https://graph.facebook.com/debug_token";

#[derive(Deserialize)]
struct DebugTokenResponse {
    data: DebugTokenData,
}

#[derive(Deserialize)]
struct DebugTokenData {
    #[serde(default)]
    user_id: String,
    #[serde(default)]
    is_valid: Option<bool>,
}

/// Facebook access token provider
pub struct FacebookAuthProvider {
    app_access_token: String,
    http: Arc<dyn HttpClient>,
}

impl FacebookAuthProvider {
    /// `app_access_token` is the `<app id>|<app secret>` token of the
    /// consuming Facebook app
    pub fn new(app_access_token: impl Into<String>, http: Arc<dyn HttpClient>) -> Self {
        Self {
            app_access_token: app_access_token.into(),
            http,
        }
    }

    fn debug_token_url(&self, token: &str) -> Result<url::Url> {
        url::Url::parse_with_params(
            DEBUG_TOKEN_URL,
            &[
                ("input_token", token),
                ("access_token", self.app_access_token.as_str()),
            ],
        )
        .map_err(|e| ApiError::internal(format!("invalid debug_token URL: {}", e)))
    }
}

#[async_trait]
impl AuthProvider for FacebookAuthProvider {
    fn identifier(&self) -> &str {
        "facebook"
    }

    async fn verify_token(&self, token: &str) -> Result<String> {
        if token.is_empty() {
            return Err(ApiError::token_verification_failed("empty token"));
        }

        let url = self.debug_token_url(token)?;
        let response = self
            .http
            .get(
                url.as_str(),
                &[("Accept", "application/json"), ("User-Agent", "socialauth-rust")],
            )
            .await?;

        if response.status != 200 {
            return Err(ApiError::upstream_error(format!(
                "debug_token failed: HTTP {}",
                response.status
            )));
        }

        let debug_token: DebugTokenResponse = response
            .json()
            .map_err(|e| ApiError::upstream_error(format!("invalid debug_token response: {}", e)))?;

        if debug_token.data.is_valid == Some(false) {
            debug!("facebook reported token as invalid");
            return Err(ApiError::token_verification_failed("token is not valid"));
        }

        if debug_token.data.user_id.is_empty() {
            return Err(ApiError::token_verification_failed("token has no user"));
        }

        Ok(debug_token.data.user_id)
    }
}
