use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, User};
use crate::error::RepoError;

/// Generic repository trait shared by every collection.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity, keeping the ID it was constructed with.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity. Fails with `RepoError::NotFound` if it
    /// does not exist.
    async fn update(&self, entity: T) -> Result<T, RepoError>;
}

/// User repository - the credential store behind sessions.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Overwrite the user's session secret. Last write wins.
    async fn update_session_secret(&self, id: Uuid, secret: &str) -> Result<(), RepoError>;
}

/// Post repository.
pub trait PostRepository: BaseRepository<Post, Uuid> {}
