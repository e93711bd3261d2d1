//! Minting and validating API keys against the credential store.

use std::sync::Arc;

use crate::domain::User;
use crate::ports::{AuthError, BaseRepository, SecretGenerator, UserRepository};

use super::api_key::ApiKey;

/// Issues and checks API keys.
///
/// Holds no state of its own; the live secret for each user is kept on the
/// user record, so every instance sharing a store agrees on which keys are
/// valid.
#[derive(Clone)]
pub struct SessionManager {
    users: Arc<dyn UserRepository>,
    secrets: Arc<dyn SecretGenerator>,
}

impl SessionManager {
    pub fn new(users: Arc<dyn UserRepository>, secrets: Arc<dyn SecretGenerator>) -> Self {
        Self { users, secrets }
    }

    /// Start a new session for `user` and return its API key.
    ///
    /// Replaces the stored secret, which revokes any key minted earlier for
    /// the same user. Concurrent mints race and the last write wins.
    pub async fn mint(&self, user: &User) -> Result<String, AuthError> {
        let secret = self.secrets.generate()?;
        let key = ApiKey::new(user.id, user.email.as_str(), secret.as_str()).encode()?;

        self.users.update_session_secret(user.id, &secret).await?;

        tracing::debug!(user_id = %user.id, "Session secret rotated");
        Ok(key)
    }

    /// Resolve a caller-supplied API key to the live user record.
    ///
    /// Every rejection is reported as [`AuthError::InvalidApiKey`]; only store
    /// failures surface as something else.
    pub async fn validate(&self, raw: &str) -> Result<User, AuthError> {
        let Some(key) = ApiKey::decode(raw) else {
            return Err(AuthError::InvalidApiKey);
        };

        let Some(user) = self.users.find_by_id(key.user_id).await? else {
            return Err(AuthError::InvalidApiKey);
        };

        let email_matches = constant_time_eq(user.email.as_bytes(), key.email.as_bytes());
        let secret_matches = user
            .session_secret
            .as_deref()
            .is_some_and(|stored| constant_time_eq(stored.as_bytes(), key.secret.as_bytes()));

        if email_matches & secret_matches {
            Ok(user)
        } else {
            Err(AuthError::InvalidApiKey)
        }
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
