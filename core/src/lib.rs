//! socialauth-core: Platform-agnostic verification of social login tokens
//!
//! Verifies bearer tokens issued by third-party identity providers and yields
//! the authenticated user ID. Google ID tokens are verified locally (claims
//! plus RS256 signature against Google's published keys); Facebook tokens are
//! checked with the Graph API. The crate depends only on abstract platform
//! traits (HttpClient, Clock, Environment) and never imports a runtime.

pub mod config;
pub mod error;
pub mod middleware;
pub mod oidc;
pub mod platform;
pub mod provider;

#[cfg(test)]
pub mod test_support;
