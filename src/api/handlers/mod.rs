//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod auth;
pub mod health;
pub mod links;
pub mod subscriptions;
pub mod votes;

pub use auth::{login_handler, me_handler, signup_handler};
pub use health::health_handler;
pub use links::{feed_handler, post_link_handler};
pub use subscriptions::events_handler;
pub use votes::vote_handler;
