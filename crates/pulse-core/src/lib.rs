//! # Pulse Core
//!
//! The domain layer of the Pulse posting API.
//! Entities, ports, and the API key session scheme live here; this crate has
//! no infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod session;

pub use error::RepoError;
pub use session::{ApiKey, SessionManager};
