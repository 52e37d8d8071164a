//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business rule failures surfaced to clients.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity_type} not found: {key}")]
    NotFound {
        entity_type: &'static str,
        key: String,
    },

    #[error("Email already in use")]
    DuplicateEmail,

    #[error("Username already in use")]
    DuplicateUsername,

    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("Inactive account")]
    InactiveAccount,

    #[error("{0} not found")]
    InvalidReference(&'static str),
}

impl DomainError {
    pub fn user_not_found(key: impl ToString) -> Self {
        Self::NotFound {
            entity_type: "User",
            key: key.to_string(),
        }
    }

    pub fn post_not_found(key: impl ToString) -> Self {
        Self::NotFound {
            entity_type: "Post",
            key: key.to_string(),
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
