//! Persistence: SeaORM repositories and the in-memory fallback.

mod connections;
mod memory;

#[cfg(feature = "sql")]
mod sql_base;
#[cfg(feature = "sql")]
pub mod sql_repo;

#[cfg(feature = "sql")]
pub mod entity;

pub use connections::DatabaseConfig;
#[cfg(feature = "sql")]
pub use connections::DatabaseHandle;
pub use memory::{InMemoryPostRepository, InMemoryStore, InMemoryUserRepository};

#[cfg(feature = "sql")]
pub use sql_repo::{SqlPostRepository, SqlUserRepository};


/// Mask an email for logging to avoid PII in logs.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let mut chars = local.chars();
            match (chars.next(), chars.next()) {
                (Some(first), Some(_)) => format!("{first}***@{domain}"),
                _ => format!("***@{domain}"),
            }
        }
        None => "***".to_string(),
    }
}
