//! API route configuration.

use crate::api::handlers::{
    events_handler, feed_handler, login_handler, me_handler, post_link_handler, signup_handler,
    vote_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Credential endpoints, composed separately so the stricter rate limiter
/// can wrap just these.
///
/// # Endpoints
///
/// - `POST /auth/signup` - Register and receive a token
/// - `POST /auth/login`  - Authenticate and receive a token
pub fn credential_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup_handler))
        .route("/auth/login", post(login_handler))
}

/// Everything else under `/api`.
///
/// Reads and subscriptions are public; mutations resolve the caller's
/// identity softly and enforce authentication inside the services.
///
/// # Endpoints
///
/// - `GET  /me`                - Current account (authenticated)
/// - `GET  /feed`              - Paginated link feed
/// - `POST /links`             - Submit a link (authenticated)
/// - `POST /links/{id}/vote`   - Vote on a link (authenticated, once)
/// - `GET  /events/{channel}`  - Live SSE stream (`newLink` / `newVote`)
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(me_handler))
        .route("/feed", get(feed_handler))
        .route("/links", post(post_link_handler))
        .route("/links/{id}/vote", post(vote_handler))
        .route("/events/{channel}", get(events_handler))
}
