//! Application state - shared across all handlers.

use std::sync::Arc;

use pulse_core::SessionManager;
use pulse_core::ports::{PasswordService, PostRepository, SecretGenerator, UserRepository};
use pulse_infra::{
    Argon2PasswordService, InMemoryPostRepository, InMemoryUserRepository, OsRngSecretGenerator,
};

use crate::config::AppConfig;

/// Shared application state. Cheap to clone; every field is a handle.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub passwords: Arc<dyn PasswordService>,
    pub sessions: SessionManager,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        passwords: Arc<dyn PasswordService>,
        secrets: Arc<dyn SecretGenerator>,
    ) -> Self {
        let sessions = SessionManager::new(users.clone(), secrets);
        Self {
            users,
            posts,
            passwords,
            sessions,
        }
    }

    /// State backed by the in-memory store.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryPostRepository::new()),
            Arc::new(Argon2PasswordService::new()),
            Arc::new(OsRngSecretGenerator),
        )
    }

    /// Build the state for the configured store.
    ///
    /// A configured database must be reachable before the server starts;
    /// there is no silent fallback once `DATABASE_URL` is set.
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        #[cfg(feature = "postgres")]
        if let Some(db_config) = &config.database {
            use anyhow::Context;
            use pulse_infra::{PostgresPostRepository, PostgresUserRepository};

            let conn = pulse_infra::database::connect(db_config)
                .await
                .context("failed to connect to database")?;

            tracing::info!("Application state initialized (postgres)");
            return Ok(Self::new(
                Arc::new(PostgresUserRepository::new(conn.clone())),
                Arc::new(PostgresPostRepository::new(conn)),
                Arc::new(Argon2PasswordService::new()),
                Arc::new(OsRngSecretGenerator),
            ));
        }

        #[cfg(not(feature = "postgres"))]
        let _ = config;

        tracing::warn!("DATABASE_URL not set. Running on the in-memory store; data is not persisted.");
        Ok(Self::in_memory())
    }
}
