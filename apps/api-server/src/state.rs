//! Application state - shared across all handlers.

use std::sync::Arc;

use bloguide_core::ports::{
    PasswordService, PostRepository, TokenDenylist, TokenService, UserRepository,
};
use bloguide_infra::{Argon2PasswordService, InMemoryStore, InMemoryTokenDenylist, JwtTokenService};

#[cfg(feature = "sql")]
use bloguide_infra::DatabaseHandle;
#[cfg(feature = "sql")]
use bloguide_infra::database::{SqlPostRepository, SqlUserRepository};
#[cfg(feature = "sql")]
use migration::{Migrator, MigratorTrait};

use crate::config::{AppConfig, Environment};

/// Failures while building the state; startup aborts on any of them.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[cfg(feature = "sql")]
    #[error("database unavailable: {0}")]
    Database(#[from] migration::DbErr),
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub passwords: Arc<dyn PasswordService>,
    pub tokens: Arc<dyn TokenService>,
    pub denylist: Arc<dyn TokenDenylist>,
    pub environment: Environment,
    #[cfg(feature = "sql")]
    pub db: Option<Arc<DatabaseHandle>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// With `DATABASE_URL` set the pool is opened and pending migrations are
    /// applied; otherwise everything lives in memory for the process lifetime.
    pub async fn new(config: &AppConfig) -> Result<Self, StartupError> {
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));

        #[cfg(feature = "sql")]
        if let Some(db_config) = &config.database {
            let handle = DatabaseHandle::connect(db_config).await?;
            Migrator::up(&handle.conn, None).await?;
            tracing::info!("Database schema is up to date");

            let state = Self {
                users: Arc::new(SqlUserRepository::new(handle.conn.clone())),
                posts: Arc::new(SqlPostRepository::new(handle.conn.clone())),
                passwords,
                tokens,
                denylist: Arc::new(InMemoryTokenDenylist::new()),
                environment: config.environment,
                db: Some(Arc::new(handle)),
            };
            tracing::info!("Application state initialized");
            return Ok(state);
        }

        #[cfg(not(feature = "sql"))]
        if config.database.is_some() {
            tracing::warn!("Built without the sql feature; ignoring DATABASE_URL");
        }

        tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        let state = Self::in_memory(passwords, tokens, config.environment);
        tracing::info!("Application state initialized");
        Ok(state)
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory(
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
        environment: Environment,
    ) -> Self {
        let store = InMemoryStore::new();

        Self {
            users: Arc::new(store.users()),
            posts: Arc::new(store.posts()),
            passwords,
            tokens,
            denylist: Arc::new(InMemoryTokenDenylist::new()),
            environment,
            #[cfg(feature = "sql")]
            db: None,
        }
    }

    /// Database state for the health check: `connected`, `unreachable` or
    /// `in-memory`.
    pub async fn database_status(&self) -> &'static str {
        #[cfg(feature = "sql")]
        if let Some(db) = &self.db {
            return match db.ping().await {
                Ok(()) => "connected",
                Err(e) => {
                    tracing::error!(error = %e, "Database ping failed");
                    "unreachable"
                }
            };
        }

        "in-memory"
    }
}
