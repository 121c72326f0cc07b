//! Per-request context construction.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_auth::AuthBearer;

use crate::domain::identity::Identity;
use crate::error::AppError;
use crate::state::AppState;

/// The context handed to every operation handler for a single request.
///
/// Built fresh per request: the bearer token (if any) is pulled from the
/// `Authorization` header and resolved to an identity. Resolution is soft:
/// a missing or invalid token yields [`Identity::Anonymous`] rather than a
/// rejection, so extraction only fails when the user lookup itself does.
/// Mutation handlers enforce authentication through the services' gate.
#[derive(Debug)]
pub struct RequestContext {
    pub identity: Identity,
}

impl FromRequestParts<AppState> for RequestContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let bearer = AuthBearer::from_request_parts(parts, &()).await.ok();

        let identity = state
            .auth_service
            .resolve_bearer(bearer.as_ref().map(|AuthBearer(token)| token.as_str()))
            .await?;

        Ok(Self { identity })
    }
}
