//! Repository trait definitions for the domain layer.
//!
//! This module defines the repository interfaces (traits) that abstract data
//! access operations following the Repository pattern. These traits are
//! implemented by concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`UserRepository`] - Account storage and lookup
//! - [`LinkRepository`] - Link storage and feed queries
//! - [`VoteRepository`] - The vote ledger

pub mod link_repository;
pub mod user_repository;
pub mod vote_repository;

pub use link_repository::LinkRepository;
pub use user_repository::UserRepository;
pub use vote_repository::VoteRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
#[cfg(test)]
pub use vote_repository::MockVoteRepository;
