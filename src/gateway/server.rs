use super::error::render_bare_errors;
use super::handlers::{
    handle_average_rating, handle_health, handle_list_reviews, handle_method_not_allowed,
    handle_not_found, handle_submit_review,
};
use super::request_log::log_requests;
use super::{AppState, GATEWAY_COMPONENT, MAX_BODY_SIZE, REQUEST_TIMEOUT_SECS};

use crate::config::GatewayConfig;
use anyhow::{Context, Result};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tower_http::timeout::TimeoutLayer;

/// Returns true when the bind address is not a loopback address.
fn is_public_bind(host: &str) -> bool {
    !matches!(
        host,
        "127.0.0.1" | "localhost" | "::1" | "[::1]" | "0:0:0:0:0:0:0:1"
    )
}

/// Bind the configured address and serve until `shutdown` fires.
pub async fn run_gateway(
    config: &GatewayConfig,
    state: AppState,
    shutdown: CancellationToken,
) -> Result<()> {
    let host = config.host.as_str();
    if is_public_bind(host) && !config.allow_public_bind {
        anyhow::bail!(
            "Refusing to bind to {host}: the review API would be reachable from other hosts.\n\
             Fix: use --host 127.0.0.1 (default), or set\n\
             [gateway] allow_public_bind = true in config.toml."
        );
    }

    let bind_host = if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]")
    } else {
        host.to_string()
    };
    let addr: SocketAddr = tokio::net::lookup_host(format!("{bind_host}:{}", config.port))
        .await
        .with_context(|| format!("resolve gateway bind address {host}"))?
        .next()
        .with_context(|| format!("no address found for {host}"))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind gateway socket {addr}"))?;

    run_gateway_with_listener(listener, state, shutdown).await
}

/// Serve on a pre-bound listener until `shutdown` fires, then drain
/// in-flight requests.
pub async fn run_gateway_with_listener(
    listener: tokio::net::TcpListener,
    state: AppState,
    shutdown: CancellationToken,
) -> Result<()> {
    let local_addr = listener
        .local_addr()
        .context("get gateway listener local address")?;
    let health = std::sync::Arc::clone(&state.health);

    print_gateway_banner(&local_addr, state.store.name());
    tracing::info!(addr = %local_addr, store = state.store.name(), "review API listening");
    health.mark_ok(GATEWAY_COMPONENT);

    let app = build_app(state);
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .context("serve review API");

    match &served {
        Ok(()) => {
            health.mark_stopped(GATEWAY_COMPONENT);
            tracing::info!("review API stopped");
        }
        Err(e) => health.mark_error(GATEWAY_COMPONENT, e),
    }
    served
}

fn print_gateway_banner(addr: &SocketAddr, store: &str) {
    println!("Review API listening on {addr} ({store} storage)");
    println!("  GET  /health");
    println!("  POST /review");
    println!("  GET  /reviews?beer_id=&user_id=");
    println!("  GET  /avg_rating?beer_id=");
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/review", post(handle_submit_review))
        .route("/reviews", get(handle_list_reviews))
        .route("/avg_rating", get(handle_average_rating))
        .fallback(handle_not_found)
        .method_not_allowed_fallback(handle_method_not_allowed)
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(REQUEST_TIMEOUT_SECS),
        ))
        .layer(middleware::map_response(render_bare_errors))
        .layer(middleware::from_fn(log_requests))
}
