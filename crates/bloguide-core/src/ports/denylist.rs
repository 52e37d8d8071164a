use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Revoked bearer tokens, keyed by token id.
///
/// An entry only needs to live until the token would have expired anyway.
#[async_trait]
pub trait TokenDenylist: Send + Sync {
    /// Revoke a token until `expires_at`.
    async fn revoke(&self, token_id: &str, expires_at: DateTime<Utc>);

    /// Check whether a token has been revoked.
    async fn is_revoked(&self, token_id: &str) -> bool;
}
