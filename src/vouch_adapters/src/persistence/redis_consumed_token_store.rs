use std::sync::Arc;

use chrono::Utc;
use redis::{Commands, Connection};
use tokio::sync::RwLock;
use vouch_core::{ConsumedTokenStore, ConsumedTokenStoreError};

use super::token_fingerprint;

#[derive(Clone)]
pub struct RedisConsumedTokenStore {
    conn: Arc<RwLock<Connection>>,
}

impl RedisConsumedTokenStore {
    pub fn new(conn: Arc<RwLock<Connection>>) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl ConsumedTokenStore for RedisConsumedTokenStore {
    #[tracing::instrument(name = "Consuming token in Redis", skip_all)]
    async fn consume(&self, token: &str, expires_at: i64) -> Result<bool, ConsumedTokenStoreError> {
        let key = get_key(token);
        let ttl = retention_secs(expires_at, Utc::now().timestamp());

        let mut conn = self.conn.write().await;
        // SET NX returns nil when the key already exists.
        let reply: Option<String> = redis::cmd("SET")
            .arg(&key)
            .arg(true)
            .arg("NX")
            .arg("EX")
            .arg(ttl)
            .query(&mut *conn)
            .map_err(|e| ConsumedTokenStoreError::DatabaseError(e.to_string()))?;

        Ok(reply.is_some())
    }

    #[tracing::instrument(name = "Releasing token in Redis", skip_all)]
    async fn release(&self, token: &str) -> Result<(), ConsumedTokenStoreError> {
        let key = get_key(token);
        let mut conn = self.conn.write().await;
        let _: () = conn
            .del(&key)
            .map_err(|e| ConsumedTokenStoreError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    async fn contains_token(&self, token: &str) -> Result<bool, ConsumedTokenStoreError> {
        let key = get_key(token);
        let mut conn = self.conn.write().await;
        conn.exists(&key)
            .map_err(|e| ConsumedTokenStoreError::DatabaseError(e.to_string()))
    }
}

// Namespace for ledger entries.
const CONSUMED_TOKEN_KEY_PREFIX: &str = "consumed_token:";

fn get_key(token: &str) -> String {
    format!("{}{}", CONSUMED_TOKEN_KEY_PREFIX, token_fingerprint(token))
}

/// Seconds an entry must live. A token is accepted through its whole `exp` second,
/// so the entry outlives it by one; `SET EX` needs at least 1.
fn retention_secs(expires_at: i64, now: i64) -> i64 {
    (expires_at - now + 1).max(1)
}
