//! Authentication implementations.

mod password;
mod secret;

pub use password::Argon2PasswordService;
pub use secret::OsRngSecretGenerator;
