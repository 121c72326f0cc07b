//! Resolved request identity and the authentication gate.

use serde_json::json;

use crate::domain::entities::User;
use crate::error::AppError;

/// The actor attached to one request.
///
/// Identity resolution is soft: a missing or unverifiable bearer token
/// resolves to `Anonymous` instead of rejecting the request, so public reads
/// stay reachable. Mutations call [`Identity::require_authenticated`] before
/// performing any side effect.
#[derive(Debug, Clone)]
pub enum Identity {
    Authenticated(User),
    Anonymous,
}

impl Identity {
    /// Returns the authenticated user, or an `unauthorized` error for
    /// anonymous requests.
    ///
    /// This is the single authorization check in the system: there is no
    /// role hierarchy, only authenticated vs. anonymous.
    pub fn require_authenticated(&self) -> Result<&User, AppError> {
        match self {
            Identity::Authenticated(user) => Ok(user),
            Identity::Anonymous => Err(AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Authentication required" }),
            )),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Identity::Anonymous)
    }
}
