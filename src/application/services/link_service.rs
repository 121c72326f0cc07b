//! Link submission and feed retrieval service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{FeedLink, Link, NewLink};
use crate::domain::event_bus::EventBus;
use crate::domain::events::DomainEvent;
use crate::domain::identity::Identity;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::url_norm::normalize_url;

/// A page of the link feed.
#[derive(Debug)]
pub struct FeedPage {
    pub links: Vec<FeedLink>,
    pub total: i64,
}

/// Service for submitting links and reading the feed.
///
/// Posting requires an authenticated identity and publishes a `newLink`
/// event after the insert succeeds. Reading never touches the gate.
pub struct LinkService<L: LinkRepository> {
    links: Arc<L>,
    events: EventBus,
}

impl<L: LinkRepository> LinkService<L> {
    /// Creates a new link service.
    pub fn new(links: Arc<L>, events: EventBus) -> Self {
        Self { links, events }
    }

    /// Submits a link on behalf of the request identity.
    ///
    /// The URL is normalized to its canonical form before storage.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for anonymous identities, with no
    /// side effects performed.
    /// Returns [`AppError::Validation`] for malformed or non-HTTP(S) URLs.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn post_link(
        &self,
        identity: &Identity,
        url: String,
        description: String,
    ) -> Result<Link, AppError> {
        let user = identity.require_authenticated()?;

        let normalized_url = normalize_url(&url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        let link = self
            .links
            .create(NewLink {
                url: normalized_url,
                description,
                posted_by: user.id,
            })
            .await?;

        self.events.publish(DomainEvent::NewLink { link: link.clone() });

        Ok(link)
    }

    /// Returns one feed page, newest links first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn feed(&self, offset: i64, limit: i64) -> Result<FeedPage, AppError> {
        let links = self.links.list(offset, limit).await?;
        let total = self.links.count().await?;

        Ok(FeedPage { links, total })
    }
}
