//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository
//! calls, the authentication gate, and event publication. Services consume
//! repository traits and provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Credentials and identity resolution
//! - [`services::link_service::LinkService`] - Link submission and the feed
//! - [`services::vote_service::VoteService`] - The vote ledger

pub mod services;
