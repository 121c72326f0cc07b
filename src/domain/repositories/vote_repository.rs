//! Repository trait for the vote ledger.

use crate::domain::entities::Vote;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for votes.
///
/// The storage layer enforces `UNIQUE (user_id, link_id)`; two concurrent
/// inserts for the same pair resolve to one row and one conflict error.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgVoteRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Inserts a vote for (user_id, link_id).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the pair already has a vote
    /// (unique-index violation).
    /// Returns [`AppError::NotFound`] if the link no longer exists
    /// (foreign-key violation).
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, user_id: i64, link_id: i64) -> Result<Vote, AppError>;

    /// Finds an existing vote for (user_id, link_id).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_user_and_link(
        &self,
        user_id: i64,
        link_id: i64,
    ) -> Result<Option<Vote>, AppError>;
}
