//! PostgreSQL implementation of the vote ledger.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Vote;
use crate::domain::repositories::VoteRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct VoteRow {
    id: i64,
    user_id: i64,
    link_id: i64,
    created_at: DateTime<Utc>,
}

impl From<VoteRow> for Vote {
    fn from(row: VoteRow) -> Self {
        Vote::new(row.id, row.user_id, row.link_id, row.created_at)
    }
}

/// PostgreSQL repository for votes.
///
/// The `votes_user_id_link_id_key` unique index makes the insert the
/// authoritative duplicate check: concurrent votes for the same pair
/// serialize at the database and all but one fail with a conflict.
pub struct PgVoteRepository {
    pool: Arc<PgPool>,
}

impl PgVoteRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VoteRepository for PgVoteRepository {
    async fn create(&self, user_id: i64, link_id: i64) -> Result<Vote, AppError> {
        let row = sqlx::query_as::<_, VoteRow>(
            r#"
            INSERT INTO votes (user_id, link_id)
            VALUES ($1, $2)
            RETURNING id, user_id, link_id, created_at
            "#,
        )
        .bind(user_id)
        .bind(link_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_user_and_link(
        &self,
        user_id: i64,
        link_id: i64,
    ) -> Result<Option<Vote>, AppError> {
        let row = sqlx::query_as::<_, VoteRow>(
            r#"
            SELECT id, user_id, link_id, created_at
            FROM votes
            WHERE user_id = $1 AND link_id = $2
            "#,
        )
        .bind(user_id)
        .bind(link_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }
}
