//! DTOs for link submission and the feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{FeedLink, Link};

/// Request to submit a link.
#[derive(Debug, Deserialize, Validate)]
pub struct PostLinkRequest {
    /// The link target (must be valid HTTP/HTTPS).
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,

    #[validate(length(min = 1, max = 500, message = "Description must be 1-500 characters"))]
    pub description: String,
}

/// A created or notified link.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub url: String,
    pub description: String,
    pub posted_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            url: link.url,
            description: link.description,
            posted_by: link.posted_by,
            created_at: link.created_at,
        }
    }
}

/// One row of the feed, with attribution and vote tally.
#[derive(Debug, Serialize)]
pub struct FeedItemResponse {
    pub id: i64,
    pub url: String,
    pub description: String,
    pub posted_by: Option<PosterResponse>,
    pub vote_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Attribution for a feed row.
#[derive(Debug, Serialize)]
pub struct PosterResponse {
    pub id: i64,
    pub name: String,
}

impl From<FeedLink> for FeedItemResponse {
    fn from(feed_link: FeedLink) -> Self {
        let FeedLink {
            link,
            posted_by_name,
            vote_count,
        } = feed_link;

        let posted_by = match (link.posted_by, posted_by_name) {
            (Some(id), Some(name)) => Some(PosterResponse { id, name }),
            _ => None,
        };

        Self {
            id: link.id,
            url: link.url,
            description: link.description,
            posted_by,
            vote_count,
            created_at: link.created_at,
        }
    }
}

/// Response containing one feed page.
#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub total: i64,
    pub items: Vec<FeedItemResponse>,
}
