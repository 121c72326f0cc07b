//! HTTP middleware for request protection and observability.
//!
//! Identity is not a middleware concern here: resolution happens in the
//! [`crate::api::extract::RequestContext`] extractor so that anonymous
//! requests still reach public read handlers, and mutations gate themselves.

pub mod rate_limit;
pub mod tracing;
