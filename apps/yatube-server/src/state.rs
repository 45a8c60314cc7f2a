//! Application state - shared across all handlers.

use std::sync::Arc;

use yatube_core::ports::{
    GroupRepository, PasswordService, PostRepository, TokenService, UserRepository,
};
use yatube_core::services::{AuthoringService, FeedAssembler};
use yatube_infra::auth::{Argon2PasswordService, JwtTokenService};
use yatube_infra::database::DatabaseConfig;
use yatube_infra::database::memory::{
    InMemoryGroupRepository, InMemoryPostRepository, InMemoryUserRepository,
};

#[cfg(feature = "postgres")]
use yatube_infra::database::{
    DatabaseConnections, PostgresGroupRepository, PostgresPostRepository, PostgresUserRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub groups: Arc<dyn GroupRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub feed: FeedAssembler,
    pub authoring: AuthoringService,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        match db_config {
            Some(config) => match DatabaseConnections::init(config).await {
                Ok(connections) => {
                    // One pooled connection shared by all repositories.
                    let db = Arc::new(connections.main);
                    let users: Arc<dyn UserRepository> =
                        Arc::new(PostgresUserRepository::new(db.clone()));
                    let groups: Arc<dyn GroupRepository> =
                        Arc::new(PostgresGroupRepository::new(db.clone()));
                    let posts: Arc<dyn PostRepository> =
                        Arc::new(PostgresPostRepository::new(db));
                    tracing::info!("Application state initialized (postgres)");
                    return Self::assemble(users, groups, posts);
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            }
        }

        #[cfg(not(feature = "postgres"))]
        {
            let _ = db_config;
            tracing::info!("Running without postgres feature - using in-memory repositories");
        }

        tracing::info!("Application state initialized (in-memory)");
        Self::in_memory()
    }

    /// Fully in-memory state; also what the handler tests run against.
    pub fn in_memory() -> Self {
        let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
        let groups: Arc<dyn GroupRepository> = Arc::new(InMemoryGroupRepository::new());
        let posts: Arc<dyn PostRepository> = Arc::new(InMemoryPostRepository::new());
        Self::assemble(users, groups, posts)
    }

    fn assemble(
        users: Arc<dyn UserRepository>,
        groups: Arc<dyn GroupRepository>,
        posts: Arc<dyn PostRepository>,
    ) -> Self {
        let feed = FeedAssembler::new(posts.clone());
        let authoring = AuthoringService::new(posts.clone(), groups.clone());
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::from_env());
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

        Self {
            users,
            groups,
            posts,
            feed,
            authoring,
            tokens,
            passwords,
        }
    }
}
