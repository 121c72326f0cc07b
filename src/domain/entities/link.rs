//! Link entity representing a submitted link.

use chrono::{DateTime, Utc};

/// A link submitted to the feed.
///
/// `posted_by` is optional: links outlive deleted accounts, and historical
/// rows may predate attribution.
#[derive(Debug, Clone)]
pub struct Link {
    pub id: i64,
    pub url: String,
    pub description: String,
    pub posted_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        url: String,
        description: String,
        posted_by: Option<i64>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            url,
            description,
            posted_by,
            created_at,
        }
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub url: String,
    pub description: String,
    pub posted_by: i64,
}

/// A feed row: the link plus read-side attribution and vote tally.
///
/// Produced by the list query's joins; never written back.
#[derive(Debug, Clone)]
pub struct FeedLink {
    pub link: Link,
    pub posted_by_name: Option<String>,
    pub vote_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_creation() {
        let now = Utc::now();
        let link = Link::new(
            1,
            "https://www.howtographql.com".to_string(),
            "Fullstack tutorial".to_string(),
            Some(7),
            now,
        );

        assert_eq!(link.id, 1);
        assert_eq!(link.url, "https://www.howtographql.com");
        assert_eq!(link.description, "Fullstack tutorial");
        assert_eq!(link.posted_by, Some(7));
        assert_eq!(link.created_at, now);
    }

    #[test]
    fn test_link_without_poster() {
        let link = Link::new(
            2,
            "https://example.com".to_string(),
            "No attribution".to_string(),
            None,
            Utc::now(),
        );

        assert!(link.posted_by.is_none());
    }

    #[test]
    fn test_feed_link_carries_tally() {
        let feed_link = FeedLink {
            link: Link::new(
                3,
                "https://example.com".to_string(),
                "desc".to_string(),
                Some(1),
                Utc::now(),
            ),
            posted_by_name: Some("A".to_string()),
            vote_count: 12,
        };

        assert_eq!(feed_link.vote_count, 12);
        assert_eq!(feed_link.posted_by_name.as_deref(), Some("A"));
    }
}
