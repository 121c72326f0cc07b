//! The vote ledger: at most one vote per (user, link).

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::Vote;
use crate::domain::event_bus::EventBus;
use crate::domain::events::DomainEvent;
use crate::domain::identity::Identity;
use crate::domain::repositories::{LinkRepository, VoteRepository};
use crate::error::AppError;

/// Service enforcing the one-vote-per-(user, link) invariant.
///
/// The duplicate pre-check gives a clean error message on the common path;
/// the storage-level unique index is what actually guarantees the invariant
/// under concurrency. Two simultaneous votes from the same user resolve to
/// exactly one inserted row and one conflict.
pub struct VoteService<V: VoteRepository, L: LinkRepository> {
    votes: Arc<V>,
    links: Arc<L>,
    events: EventBus,
}

impl<V: VoteRepository, L: LinkRepository> VoteService<V, L> {
    /// Creates a new vote service.
    pub fn new(votes: Arc<V>, links: Arc<L>, events: EventBus) -> Self {
        Self {
            votes,
            links,
            events,
        }
    }

    /// Casts the request identity's vote on a link.
    ///
    /// Publishes a `newVote` event after the insert succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for anonymous identities, before
    /// any store access.
    /// Returns [`AppError::NotFound`] if the link does not exist.
    /// Returns [`AppError::Conflict`] if this user already voted for this
    /// link, whether caught by the pre-check or by the unique index.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn cast_vote(&self, identity: &Identity, link_id: i64) -> Result<Vote, AppError> {
        let user = identity.require_authenticated()?;

        if self.links.find_by_id(link_id).await?.is_none() {
            return Err(AppError::not_found(
                "Link not found",
                json!({ "link_id": link_id }),
            ));
        }

        if self
            .votes
            .find_by_user_and_link(user.id, link_id)
            .await?
            .is_some()
        {
            return Err(duplicate_vote(link_id));
        }

        // A concurrent vote can still slip between the check and the insert;
        // the unique index reports it as a conflict, translated here to the
        // same duplicate-vote error. A concurrent link deletion surfaces as
        // the foreign-key not-found translation.
        let vote = self
            .votes
            .create(user.id, link_id)
            .await
            .map_err(|e| match e {
                AppError::Conflict { .. } => duplicate_vote(link_id),
                other => other,
            })?;

        self.events.publish(DomainEvent::NewVote { vote: vote.clone() });

        Ok(vote)
    }
}

fn duplicate_vote(link_id: i64) -> AppError {
    AppError::conflict("Already voted for this link", json!({ "link_id": link_id }))
}
