//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx prepared
//! statements via the runtime query API.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - Account storage and lookup
//! - [`PgLinkRepository`] - Link storage and feed queries
//! - [`PgVoteRepository`] - The vote ledger

pub mod pg_link_repository;
pub mod pg_user_repository;
pub mod pg_vote_repository;

pub use pg_link_repository::PgLinkRepository;
pub use pg_user_repository::PgUserRepository;
pub use pg_vote_repository::PgVoteRepository;
