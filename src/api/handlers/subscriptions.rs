//! Live event subscriptions over Server-Sent Events.

use axum::{
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::{Stream, StreamExt};
use serde_json::json;

use crate::api::dto::link::LinkResponse;
use crate::api::dto::vote::VoteResponse;
use crate::domain::events::{Channel, DomainEvent};
use crate::error::AppError;
use crate::state::AppState;

/// Streams a channel's events to the client as they are published.
///
/// # Endpoint
///
/// `GET /api/events/{channel}` where `{channel}` is `newLink` or `newVote`.
///
/// Subscribers only see events published after the stream is established;
/// there is no replay. Disconnecting (including abruptly) drops the stream,
/// which releases the subscription slot; no further deliveries are
/// attempted. Public: events carry no more than the public feed does.
///
/// # Errors
///
/// Returns 404 Not Found for unknown channel names.
pub async fn events_handler(
    State(state): State<AppState>,
    Path(channel): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, AppError> {
    let channel: Channel = channel.parse().map_err(|_| {
        AppError::not_found("Unknown event channel", json!({ "channel": channel }))
    })?;

    tracing::debug!(channel = %channel, "Subscriber connected");

    let stream = state
        .events
        .subscribe(channel)
        .into_stream()
        .map(render_event);

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

/// Renders a domain event as a named SSE frame with a JSON payload.
fn render_event(event: DomainEvent) -> Result<Event, axum::Error> {
    let name = event.channel().as_str();
    match event {
        DomainEvent::NewLink { link } => Event::default()
            .event(name)
            .json_data(LinkResponse::from(link)),
        DomainEvent::NewVote { vote } => Event::default()
            .event(name)
            .json_data(VoteResponse::from(vote)),
    }
}
