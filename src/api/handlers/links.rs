//! Handlers for the link feed and link submission.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::link::{FeedItemResponse, FeedResponse, LinkResponse, PostLinkRequest};
use crate::api::dto::pagination::PaginationParams;
use crate::api::extract::RequestContext;
use crate::error::AppError;
use crate::state::AppState;

/// Returns one page of the feed, newest links first.
///
/// # Endpoint
///
/// `GET /api/feed?page=1&page_size=25`
///
/// Public: anonymous requests are served like any other.
///
/// # Errors
///
/// Returns 400 Bad Request for out-of-range pagination parameters.
pub async fn feed_handler(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<FeedResponse>, AppError> {
    let (offset, limit) = params
        .validate_and_get_offset_limit()
        .map_err(|reason| AppError::bad_request(reason, json!({})))?;

    let page = state.link_service.feed(offset, limit).await?;

    Ok(Json(FeedResponse {
        total: page.total,
        items: page.links.into_iter().map(FeedItemResponse::from).collect(),
    }))
}

/// Submits a link on behalf of the authenticated caller.
///
/// Publishes a `newLink` event to live subscribers once the link is stored.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com", "description": "Worth reading" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails.
/// Returns 401 Unauthorized for anonymous requests.
pub async fn post_link_handler(
    State(state): State<AppState>,
    context: RequestContext,
    Json(payload): Json<PostLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .post_link(&context.identity, payload.url, payload.description)
        .await?;

    Ok((StatusCode::CREATED, Json(LinkResponse::from(link))))
}
