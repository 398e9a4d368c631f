//! HTTP routes for the gateway
//!
//! This module defines all HTTP endpoints exposed by the gateway.

pub mod health;
pub mod proxy;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the main application router
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration: the gateway is called from browsers
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // POST-only; axum answers other methods on this path with 405
        .route("/api/proxy", post(proxy::proxy))
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
