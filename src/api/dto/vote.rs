//! DTOs for the vote endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::Vote;

/// A recorded vote.
#[derive(Debug, Serialize)]
pub struct VoteResponse {
    pub id: i64,
    pub user_id: i64,
    pub link_id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Vote> for VoteResponse {
    fn from(vote: Vote) -> Self {
        Self {
            id: vote.id,
            user_id: vote.user_id,
            link_id: vote.link_id,
            created_at: vote.created_at,
        }
    }
}
