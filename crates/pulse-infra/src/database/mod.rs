//! Storage backends for users and posts.

pub mod memory;

#[cfg(feature = "postgres")]
mod connections;
#[cfg(feature = "postgres")]
pub mod entity;
#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
mod postgres_repo;

pub use memory::{InMemoryPostRepository, InMemoryUserRepository};

#[cfg(feature = "postgres")]
pub use connections::{DatabaseConfig, connect};
#[cfg(feature = "postgres")]
pub use postgres_repo::{PostgresPostRepository, PostgresUserRepository};


/// Mask an email for logging to avoid PII in logs: `ann@x.com` -> `a***@x.com`.
pub fn mask_email(email: &str) -> String {
    let Some(at_pos) = email.find('@') else {
        return "***".to_string();
    };
    let (local, domain) = email.split_at(at_pos);
    match local.chars().next() {
        Some(first) if local.chars().count() > 1 => format!("{first}***{domain}"),
        _ => format!("***{domain}"),
    }
}
