//! In-memory token denylist.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use bloguide_core::ports::TokenDenylist;

/// Revoked token ids mapped to the expiry of their token.
///
/// Entries are pruned lazily on every revocation. Data is lost on process
/// restart, which only re-admits tokens that were logged out.
pub struct InMemoryTokenDenylist {
    revoked: RwLock<HashMap<String, DateTime<Utc>>>,
}

impl InMemoryTokenDenylist {
    pub fn new() -> Self {
        Self {
            revoked: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryTokenDenylist {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenDenylist for InMemoryTokenDenylist {
    async fn revoke(&self, token_id: &str, expires_at: DateTime<Utc>) {
        let now = Utc::now();
        let mut revoked = self.revoked.write().await;

        revoked.retain(|_, exp| *exp > now);
        if expires_at > now {
            revoked.insert(token_id.to_string(), expires_at);
        }

        tracing::debug!(live_entries = revoked.len(), "Token revoked");
    }

    async fn is_revoked(&self, token_id: &str) -> bool {
        self.revoked
            .read()
            .await
            .get(token_id)
            .is_some_and(|expires_at| *expires_at > Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[tokio::test]
    async fn test_revoke_and_check() {
        let denylist = InMemoryTokenDenylist::new();
        denylist
            .revoke("jti-1", Utc::now() + TimeDelta::minutes(5))
            .await;

        assert!(denylist.is_revoked("jti-1").await);
        assert!(!denylist.is_revoked("jti-2").await);
    }

    #[tokio::test]
    async fn test_already_expired_token_not_stored() {
        let denylist = InMemoryTokenDenylist::new();
        denylist
            .revoke("old", Utc::now() - TimeDelta::seconds(1))
            .await;

        assert!(!denylist.is_revoked("old").await);
        assert!(denylist.revoked.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_revoke_prunes_expired_entries() {
        let denylist = InMemoryTokenDenylist::new();
        denylist
            .revoked
            .write()
            .await
            .insert("stale".to_string(), Utc::now() - TimeDelta::minutes(1));

        denylist
            .revoke("fresh", Utc::now() + TimeDelta::minutes(1))
            .await;

        let revoked = denylist.revoked.read().await;
        assert!(!revoked.contains_key("stale"));
        assert!(revoked.contains_key("fresh"));
    }
}
