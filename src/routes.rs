//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /health`  - Liveness check (public)
//! - `/api/*`       - JSON API; reads and event streams public, mutations
//!   gated inside the services
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on credential endpoints

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
pub fn app_router(state: AppState) -> Router {
    let credential_router = api::routes::credential_routes().layer(rate_limit::secure_layer());

    let api_router = api::routes::api_routes().merge(credential_router);

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer())
}
