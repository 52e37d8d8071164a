//! Authentication ports.

use chrono::{DateTime, TimeDelta, Utc};
use uuid::Uuid;

/// Claims carried by a verified bearer token.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenClaims {
    pub user_id: Uuid,
    /// Token subject.
    pub email: String,
    /// Unique token id, used for revocation.
    pub token_id: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Token service trait for signed bearer tokens.
pub trait TokenService: Send + Sync {
    /// Issue a token for a user that expires after `ttl`.
    fn issue_token(&self, user_id: Uuid, email: &str, ttl: TimeDelta)
    -> Result<String, AuthError>;

    /// Validate signature, issuer and expiry, then decode the claims.
    fn verify_token(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Lifetime of tokens issued at login.
    fn default_ttl(&self) -> TimeDelta;

    /// Issue a token with the default lifetime.
    fn generate_token(&self, user_id: Uuid, email: &str) -> Result<String, AuthError> {
        self.issue_token(user_id, email, self.default_ttl())
    }
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password with a fresh salt.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a stored hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;

    /// Run a verification that can never match, so a login for an unknown
    /// account costs as much as one with a wrong password.
    fn verify_decoy(&self, password: &str) -> Result<(), AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token has been revoked")]
    TokenRevoked,

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
