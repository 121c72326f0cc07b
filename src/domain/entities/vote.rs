//! Vote entity: durable proof that a user voted for a link.

use chrono::{DateTime, Utc};

/// One user's vote on one link.
///
/// At most one row exists per (user_id, link_id); the storage layer enforces
/// this with a unique index. Votes are never mutated.
#[derive(Debug, Clone)]
pub struct Vote {
    pub id: i64,
    pub user_id: i64,
    pub link_id: i64,
    pub created_at: DateTime<Utc>,
}

impl Vote {
    /// Creates a new Vote instance.
    pub fn new(id: i64, user_id: i64, link_id: i64, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id,
            link_id,
            created_at,
        }
    }
}
