//! Shared application state injected into all handlers.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{AuthService, LinkService, VoteService};
use crate::domain::event_bus::EventBus;
use crate::infrastructure::persistence::{PgLinkRepository, PgUserRepository, PgVoteRepository};

/// Per-process service set.
///
/// Constructed once at startup and cloned into every request; all shared
/// pieces (pool, event bus, signing secret) live behind the services as
/// explicit dependencies. There are no module-level singletons.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService<PgUserRepository>>,
    pub link_service: Arc<LinkService<PgLinkRepository>>,
    pub vote_service: Arc<VoteService<PgVoteRepository, PgLinkRepository>>,
    pub events: EventBus,
}

impl AppState {
    /// Wires repositories and services over a connection pool.
    pub fn new(
        pool: Arc<PgPool>,
        signing_secret: String,
        password_hash_iterations: u32,
        events: EventBus,
    ) -> Self {
        let user_repository = Arc::new(PgUserRepository::new(pool.clone()));
        let link_repository = Arc::new(PgLinkRepository::new(pool.clone()));
        let vote_repository = Arc::new(PgVoteRepository::new(pool));

        let auth_service = Arc::new(AuthService::new(
            user_repository,
            signing_secret,
            password_hash_iterations,
        ));
        let link_service = Arc::new(LinkService::new(link_repository.clone(), events.clone()));
        let vote_service = Arc::new(VoteService::new(
            vote_repository,
            link_repository,
            events.clone(),
        ));

        Self {
            auth_service,
            link_service,
            vote_service,
            events,
        }
    }
}
