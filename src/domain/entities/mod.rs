//! Core domain entities representing the business data model.
//!
//! This module contains the fundamental data structures that represent the
//! core concepts of the link-sharing service. Entities are plain data
//! structures without business logic.
//!
//! # Entity Types
//!
//! - [`User`] - A registered account
//! - [`Link`] - A submitted link
//! - [`Vote`] - One user's vote on one link
//!
//! # Design Pattern
//!
//! Entities follow the "New Type" pattern with separate structs for creation:
//! `NewUser` and `NewLink` carry the insertable fields; read-side projections
//! like [`FeedLink`] carry joined data.

pub mod link;
pub mod user;
pub mod vote;

pub use link::{FeedLink, Link, NewLink};
pub use user::{NewUser, User};
pub use vote::Vote;
