//! Pixel Store Storefront - JSON shopping API.
//!
//! This binary serves the store endpoints on port 3000.
//!
//! # Architecture
//!
//! - Axum web framework, JSON in and JSON out
//! - In-memory inventory seeded from a catalog file or the built-in catalog
//! - In-memory shopping carts keyed by the caller's `session_id`
//!
//! Nothing is persisted: restarting the process restores the catalog's stock
//! and drops every cart.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;

use pixel_store_storefront::config::StorefrontConfig;
use pixel_store_storefront::state::AppState;
use pixel_store_storefront::{middleware, telemetry};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");

    // Sentry first so the tracing layer has a client
    let _sentry_guard = telemetry::init_sentry(&config.sentry);
    telemetry::init_tracing().expect("Failed to install tracing subscriber");
    if config.sentry.dsn.is_some() {
        tracing::info!("Sentry initialized");
    }
    tracing::debug!(?config, "Configuration loaded");

    let state = AppState::new(&config).expect("Failed to load catalog");

    let app = pixel_store_storefront::app(state)
        .layer(middleware::rate_limiter(config.rate_limit))
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");
    tracing::info!(%addr, "storefront listening");

    // Peer addresses feed the rate limiter's fallback key
    let service = app.into_make_service_with_connect_info::<SocketAddr>();
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("storefront stopped");
}

/// Resolve on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut terminate =
            signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");
        tokio::select! {
            result = tokio::signal::ctrl_c() => result.expect("Failed to install Ctrl+C handler"),
            _ = terminate.recv() => {}
        }
    }

    #[cfg(not(unix))]
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");

    tracing::info!("Shutdown signal received, draining connections");
}
