//! Authentication ports.

use crate::error::RepoError;

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Source of session secrets.
///
/// Implementations must draw from a cryptographically secure generator and
/// must never emit the API key delimiter (`:`).
pub trait SecretGenerator: Send + Sync {
    fn generate(&self) -> Result<String, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Covers every reason a presented key is refused.
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Field cannot be encoded into an API key: {0}")]
    UnencodableField(&'static str),

    #[error("Hashing error: {0}")]
    HashingError(String),

    #[error("Secret generation failed: {0}")]
    SecretGeneration(String),

    #[error(transparent)]
    Repository(#[from] RepoError),
}
