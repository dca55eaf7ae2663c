use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Tokens are treated as stale this long before the provider's expiry.
pub const EXPIRY_BUFFER_MS: i64 = 60_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedToken {
    pub token: String,
    /// Epoch milliseconds.
    pub expires_at_ms: i64,
}

impl CachedToken {
    pub fn new(token: String, expires_in_secs: u64, now_ms: i64) -> Self {
        Self {
            token,
            expires_at_ms: now_ms + (expires_in_secs as i64) * 1000,
        }
    }

    pub fn is_fresh(&self, now_ms: i64) -> bool {
        now_ms < self.expires_at_ms - EXPIRY_BUFFER_MS
    }
}

/// Bearer token shared by every request made through one client.
///
/// Clones share the same slot. Refreshes are not serialized: two callers
/// that both find the token stale will both fetch a new one and the last
/// write wins.
#[derive(Debug, Clone, Default)]
pub struct TokenCache {
    slot: Arc<RwLock<Option<CachedToken>>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached token, if it is still fresh at `now_ms`.
    pub async fn get(&self, now_ms: i64) -> Option<String> {
        let slot = self.slot.read().await;
        match slot.as_ref() {
            Some(cached) if cached.is_fresh(now_ms) => Some(cached.token.clone()),
            Some(_) => {
                debug!("Cached token is inside the expiry buffer");
                None
            }
            None => None,
        }
    }

    pub async fn set(&self, token: CachedToken) {
        *self.slot.write().await = Some(token);
    }

    pub async fn clear(&self) {
        *self.slot.write().await = None;
    }

    /// Whatever is stored, fresh or not.
    pub async fn peek(&self) -> Option<CachedToken> {
        self.slot.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_775_000_000_000;

    #[test]
    fn test_freshness_buffer() {
        let token = CachedToken::new("t".to_string(), 1799, NOW);
        assert_eq!(token.expires_at_ms, NOW + 1_799_000);
        assert!(token.is_fresh(NOW));
        assert!(token.is_fresh(NOW + 1_799_000 - 60_001));
        assert!(!token.is_fresh(NOW + 1_799_000 - 60_000));
        assert!(!token.is_fresh(NOW + 1_799_000));

        // Lifetime shorter than the buffer is never fresh.
        assert!(!CachedToken::new("t".to_string(), 30, NOW).is_fresh(NOW));
    }

    #[tokio::test]
    async fn test_get_set_clear() {
        let cache = TokenCache::new();
        assert_eq!(cache.get(NOW).await, None);

        cache.set(CachedToken::new("abc".to_string(), 1799, NOW)).await;
        assert_eq!(cache.get(NOW).await.as_deref(), Some("abc"));
        assert_eq!(cache.get(NOW + 1_799_000).await, None);
        // Stale entries stay until replaced or cleared.
        assert!(cache.peek().await.is_some());

        cache.clear().await;
        assert_eq!(cache.peek().await, None);
    }

    #[tokio::test]
    async fn test_clones_share_the_slot() {
        let cache = TokenCache::new();
        let other = cache.clone();
        other.set(CachedToken::new("shared".to_string(), 1799, NOW)).await;
        assert_eq!(cache.get(NOW).await.as_deref(), Some("shared"));
    }
}
