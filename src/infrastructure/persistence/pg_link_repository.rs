//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{FeedLink, Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    url: String,
    description: String,
    posted_by: Option<i64>,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link::new(row.id, row.url, row.description, row.posted_by, row.created_at)
    }
}

#[derive(sqlx::FromRow)]
struct FeedRow {
    id: i64,
    url: String,
    description: String,
    posted_by: Option<i64>,
    created_at: DateTime<Utc>,
    posted_by_name: Option<String>,
    vote_count: i64,
}

impl From<FeedRow> for FeedLink {
    fn from(row: FeedRow) -> Self {
        FeedLink {
            link: Link::new(row.id, row.url, row.description, row.posted_by, row.created_at),
            posted_by_name: row.posted_by_name,
            vote_count: row.vote_count,
        }
    }
}

/// PostgreSQL repository for link storage and feed queries.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (url, description, posted_by)
            VALUES ($1, $2, $3)
            RETURNING id, url, description, posted_by, created_at
            "#,
        )
        .bind(&new_link.url)
        .bind(&new_link.description)
        .bind(new_link.posted_by)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, url, description, posted_by, created_at
            FROM links
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<FeedLink>, AppError> {
        let rows = sqlx::query_as::<_, FeedRow>(
            r#"
            SELECT
                l.id,
                l.url,
                l.description,
                l.posted_by,
                l.created_at,
                u.name AS posted_by_name,
                COUNT(v.id) AS vote_count
            FROM links l
            LEFT JOIN users u ON u.id = l.posted_by
            LEFT JOIN votes v ON v.link_id = l.id
            GROUP BY l.id, u.name
            ORDER BY l.created_at DESC, l.id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
