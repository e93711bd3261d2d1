use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered account.
///
/// `session_secret` is `None` until the first successful login and is
/// replaced on every login after that; only the current value backs a valid
/// API key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub user_name: String,
    pub email: String,
    pub password_hash: String,
    pub session_secret: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a generated ID and no session.
    pub fn new(user_name: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_name,
            email,
            password_hash,
            session_secret: None,
            created_at: Utc::now(),
        }
    }

    pub fn has_session(&self) -> bool {
        self.session_secret.is_some()
    }
}
