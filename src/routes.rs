//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /`        - Create a short link
//! - `GET  /health`  - Health check
//! - `GET  /{id}`    - Short link redirect
//!
//! # Middleware
//!
//! Outermost first:
//!
//! - **Tracing** - Structured request/response logging
//! - **Write timeout** - Bounds handler time, `408` on expiry
//! - **Read timeout** - Bounds request body upload

use crate::api::handlers::{create_link_handler, health_handler, redirect_handler};
use crate::api::middleware::{timeout, tracing};
use crate::config::HttpTimeouts;
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `timeouts` - body read and response write limits
pub fn app_router(state: AppState, timeouts: HttpTimeouts) -> Router {
    Router::new()
        .route("/", post(create_link_handler))
        .route("/health", get(health_handler))
        .route("/{id}", get(redirect_handler))
        .with_state(state)
        .layer(timeout::read_layer(timeouts.read))
        .layer(timeout::write_layer(timeouts.write))
        .layer(tracing::layer())
}
