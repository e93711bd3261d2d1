//! In-memory repositories - used when no database is configured, and in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use pulse_core::domain::{Post, User};
use pulse_core::error::RepoError;
use pulse_core::ports::{BaseRepository, PostRepository, UserRepository};

/// A collection of entities keyed by ID behind an async RwLock.
///
/// Each call takes the lock once, which gives the per-document atomicity
/// the repositories promise. Data is lost on process restart.
pub struct InMemoryRepository<T> {
    rows: RwLock<HashMap<Uuid, T>>,
}

pub type InMemoryUserRepository = InMemoryRepository<User>;
pub type InMemoryPostRepository = InMemoryRepository<Post>;

impl<T> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Entities that carry their own key.
pub trait Keyed {
    fn key(&self) -> Uuid;
}

impl Keyed for User {
    fn key(&self) -> Uuid {
        self.id
    }
}

impl Keyed for Post {
    fn key(&self) -> Uuid {
        self.id
    }
}

#[async_trait]
impl<T> BaseRepository<T, Uuid> for InMemoryRepository<T>
where
    T: Keyed + Clone + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, RepoError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn insert(&self, entity: T) -> Result<T, RepoError> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&entity.key()) {
            return Err(RepoError::Query(format!(
                "duplicate primary key {}",
                entity.key()
            )));
        }
        rows.insert(entity.key(), entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: T) -> Result<T, RepoError> {
        let mut rows = self.rows.write().await;
        let slot = rows.get_mut(&entity.key()).ok_or(RepoError::NotFound)?;
        *slot = entity.clone();
        Ok(entity)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows.values().find(|u| u.email == email).cloned())
    }

    async fn update_session_secret(&self, id: Uuid, secret: &str) -> Result<(), RepoError> {
        let mut rows = self.rows.write().await;
        let user = rows.get_mut(&id).ok_or(RepoError::NotFound)?;
        user.session_secret = Some(secret.to_string());
        Ok(())
    }
}

impl PostRepository for InMemoryPostRepository {}
