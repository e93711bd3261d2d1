//! API key authentication for protected routes.
//!
//! The key travels in the JSON body (`apiKey`), so authentication runs
//! inside the handler once the body is extracted, before any data is read
//! or written.

use pulse_core::SessionManager;
use pulse_core::domain::User;
use pulse_core::ports::AuthError;
use uuid::Uuid;

use super::error::{AppError, AppResult};

/// Authenticated caller identity.
///
/// Always built from the stored user record, never from the id inside the
/// presented key.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
}

impl From<User> for Identity {
    fn from(user: User) -> Self {
        Self { user_id: user.id }
    }
}

/// Resolve an API key to the caller's identity.
pub async fn authenticate(sessions: &SessionManager, api_key: &str) -> AppResult<Identity> {
    match sessions.validate(api_key).await {
        Ok(user) => Ok(Identity::from(user)),
        Err(AuthError::InvalidApiKey) => {
            tracing::debug!("Rejected API key");
            Err(AppError::InvalidApiKey)
        }
        Err(e) => Err(e.into()),
    }
}
