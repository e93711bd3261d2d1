//! API key sessions.
//!
//! An API key is a capability, not a signed token: it is trusted only while
//! its user id, email and secret match the live user record. Logging in
//! again replaces the secret and silently revokes every earlier key.

mod api_key;
mod manager;

pub use api_key::{API_KEY_DELIMITER, API_KEY_MARKER, ApiKey, is_encodable};
pub use manager::SessionManager;
