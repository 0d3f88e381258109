use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use vouch_core::{ConsumedTokenStore, ConsumedTokenStoreError};

use super::token_fingerprint;

/// In-memory ledger. Entries are pruned once the token they stand for has expired.
#[derive(Debug, Default, Clone)]
pub struct HashSetConsumedTokenStore {
    // fingerprint -> expiry (unix seconds)
    consumed_tokens: Arc<RwLock<HashMap<String, i64>>>,
}

impl HashSetConsumedTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.consumed_tokens.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.consumed_tokens.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl ConsumedTokenStore for HashSetConsumedTokenStore {
    async fn consume(&self, token: &str, expires_at: i64) -> Result<bool, ConsumedTokenStoreError> {
        let now = Utc::now().timestamp();
        let mut consumed_tokens = self.consumed_tokens.write().await;
        consumed_tokens.retain(|_, expiry| *expiry >= now);

        let fingerprint = token_fingerprint(token);
        if consumed_tokens.contains_key(&fingerprint) {
            return Ok(false);
        }
        consumed_tokens.insert(fingerprint, expires_at);
        Ok(true)
    }

    async fn release(&self, token: &str) -> Result<(), ConsumedTokenStoreError> {
        self.consumed_tokens
            .write()
            .await
            .remove(&token_fingerprint(token));
        Ok(())
    }

    async fn contains_token(&self, token: &str) -> Result<bool, ConsumedTokenStoreError> {
        let consumed_tokens = self.consumed_tokens.read().await;
        Ok(consumed_tokens.contains_key(&token_fingerprint(token)))
    }
}
