//! socialauth-server: HTTP front end for social login token verification
//!
//! Lightweight HTTP server using hyper. Requests to protected routes carry
//! `X-Auth-Provider` and `X-Auth-Token` headers; anything that fails
//! verification gets a uniform 403.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use socialauth_core::config::Config;
use socialauth_core::error::{ApiError, Result};
use socialauth_core::middleware::{AuthMiddleware, FORBIDDEN_BODY};
use socialauth_core::provider::{self, GoogleAuthProvider};

mod platform;

use platform::{ProcessEnv, ReqwestHttpClient, SystemClock};

/// Shared application state
struct AppState {
    auth: AuthMiddleware,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "socialauth-server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let port: u16 = match std::env::var("PORT") {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ApiError::internal("PORT must be a number"))?,
        Err(_) => 8080,
    };

    let config = Config::from_env(&ProcessEnv)?;

    let http = Arc::new(ReqwestHttpClient::new(Duration::from_secs(
        config.http_timeout_secs,
    ))?);
    let configured = provider::configure(&config, http, Arc::new(SystemClock)).await?;

    if let Some(google) = configured.google {
        spawn_key_refresh(google, config.key_refresh_secs);
    }

    let state = Arc::new(AppState {
        auth: AuthMiddleware::new(Arc::new(configured.registry)),
    });

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .map_err(|e| ApiError::internal(format!("failed to bind port {}: {}", port, e)))?;

    info!(port, "socialauth-server listening");

    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!(error = %e, "accept failed");
                continue;
            }
        };
        let state = state.clone();

        tokio::spawn(async move {
            let io = hyper_util::rt::TokioIo::new(stream);
            let service = service_fn(move |req| {
                let state = state.clone();
                async move { handle_request(req, &state).await }
            });

            if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                warn!(%peer, error = %e, "connection error");
            }
        });
    }
}

/// Periodically replace Google's signing keys; failures keep the old keys
fn spawn_key_refresh(google: Arc<GoogleAuthProvider>, interval_secs: u64) {
    if interval_secs == 0 {
        info!("google key refresh disabled");
        return;
    }

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
        // The first tick fires immediately; keys were just fetched
        interval.tick().await;
        loop {
            interval.tick().await;
            if let Err(e) = google.refresh_keys().await {
                warn!(error = %e, "google key refresh failed, keeping previous keys");
            }
        }
    });
}

type HyperResponse = Response<Full<Bytes>>;

async fn handle_request<B>(
    req: Request<B>,
    state: &AppState,
) -> std::result::Result<HyperResponse, std::convert::Infallible> {
    Ok(route_request(req, state).await)
}

async fn route_request<B>(req: Request<B>, state: &AppState) -> HyperResponse {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    match (method, path.as_str()) {
        (Method::GET, "/") => handle_health(),
        (Method::GET, "/whoami") => handle_whoami(req, state).await,
        _ => json_response(StatusCode::NOT_FOUND, &serde_json::json!({"error": "not_found"})),
    }
}

fn handle_health() -> HyperResponse {
    json_response(
        StatusCode::OK,
        &serde_json::json!({
            "name": "socialauth",
            "status": "ok"
        }),
    )
}

async fn handle_whoami<B>(mut req: Request<B>, state: &AppState) -> HyperResponse {
    match state.auth.authenticate(&mut req).await {
        Ok(user) => json_response(
            StatusCode::OK,
            &serde_json::json!({
                "provider": user.provider,
                "user_id": user.user_id
            }),
        ),
        Err(_) => forbidden_response(),
    }
}

/// Same response for every authentication failure
fn forbidden_response() -> HyperResponse {
    let mut response = Response::new(Full::new(Bytes::from_static(FORBIDDEN_BODY.as_bytes())));
    *response.status_mut() = StatusCode::FORBIDDEN;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
    response
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: &T) -> HyperResponse {
    let json = serde_json::to_vec(body).unwrap_or_default();
    let mut response = Response::new(Full::new(Bytes::from(json)));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}
