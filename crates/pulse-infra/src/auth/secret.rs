//! Session secrets drawn from the operating system RNG.

use argon2::password_hash::rand_core::{OsRng, RngCore};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use pulse_core::ports::{AuthError, SecretGenerator};

const SECRET_BYTES: usize = 32;

/// 256 random bits, URL-safe base64 without padding. The alphabet has no
/// `:`, so secrets always fit in an API key.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRngSecretGenerator;

impl SecretGenerator for OsRngSecretGenerator {
    fn generate(&self) -> Result<String, AuthError> {
        let mut bytes = [0u8; SECRET_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| AuthError::SecretGeneration(e.to_string()))?;
        Ok(URL_SAFE_NO_PAD.encode(bytes))
    }
}
