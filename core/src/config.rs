//! Configuration and secrets management

use crate::error::{ApiError, Result};
use crate::oidc::GOOGLE_CERTS_URL;
use crate::platform::Environment;

/// Default interval between signing key refreshes (1 hour)
pub const DEFAULT_KEY_REFRESH_SECS: u64 = 3600;

/// Default timeout for outbound HTTP requests
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Provider configuration loaded from environment
#[derive(Debug, Clone)]
pub struct Config {
    /// Google OAuth client ID; the expected `aud` of ID tokens
    pub google_client_id: Option<String>,
    /// Endpoint publishing Google's signing keys
    pub google_certs_url: String,
    /// Facebook app access token used for `debug_token` calls
    pub facebook_app_access_token: Option<String>,
    /// Seconds between key refreshes (0 disables refresh)
    pub key_refresh_secs: u64,
    /// Timeout for outbound HTTP requests
    pub http_timeout_secs: u64,
}

impl Config {
    /// Load configuration from platform environment
    pub fn from_env(env: &dyn Environment) -> Result<Self> {
        let config = Self {
            google_client_id: optional(env.get_var("GOOGLE_CLIENT_ID")),
            google_certs_url: optional(env.get_var("GOOGLE_CERTS_URL"))
                .unwrap_or_else(|| GOOGLE_CERTS_URL.to_string()),
            facebook_app_access_token: optional(env.get_secret("FACEBOOK_APP_ACCESS_TOKEN")),
            key_refresh_secs: parse_secs(env, "KEY_REFRESH_SECS", DEFAULT_KEY_REFRESH_SECS)?,
            http_timeout_secs: parse_secs(env, "HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?,
        };

        if config.google_client_id.is_none() && config.facebook_app_access_token.is_none() {
            return Err(ApiError::internal(
                "no provider configured: set GOOGLE_CLIENT_ID or FACEBOOK_APP_ACCESS_TOKEN",
            ));
        }

        if config.http_timeout_secs == 0 {
            return Err(ApiError::internal("HTTP_TIMEOUT_SECS must be greater than zero"));
        }

        Ok(config)
    }
}

/// Treat unset and blank values alike
fn optional(value: Result<String>) -> Option<String> {
    value.ok().filter(|v| !v.trim().is_empty())
}

fn parse_secs(env: &dyn Environment, name: &str, default: u64) -> Result<u64> {
    match optional(env.get_var(name)) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ApiError::internal(format!("{} must be a number of seconds", name))),
        None => Ok(default),
    }
}
