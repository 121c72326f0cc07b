//! Handler for casting votes.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::dto::vote::VoteResponse;
use crate::api::extract::RequestContext;
use crate::error::AppError;
use crate::state::AppState;

/// Casts the authenticated caller's vote on a link.
///
/// At most one vote exists per (user, link); repeats are rejected. A
/// successful vote publishes a `newVote` event to live subscribers.
///
/// # Endpoint
///
/// `POST /api/links/{id}/vote`
///
/// # Errors
///
/// Returns 401 Unauthorized for anonymous requests.
/// Returns 404 Not Found if the link does not exist.
/// Returns 409 Conflict if the caller already voted for this link.
pub async fn vote_handler(
    State(state): State<AppState>,
    context: RequestContext,
    Path(link_id): Path<i64>,
) -> Result<(StatusCode, Json<VoteResponse>), AppError> {
    let vote = state
        .vote_service
        .cast_vote(&context.identity, link_id)
        .await?;

    Ok((StatusCode::CREATED, Json(VoteResponse::from(vote))))
}
