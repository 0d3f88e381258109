pub mod hashmap_user_store;
pub mod hashset_consumed_token_store;
pub mod password_hashing;
pub mod postgres_user_store;
pub mod redis_consumed_token_store;

use sha2::{Digest, Sha256};

pub use hashmap_user_store::HashMapUserStore;
pub use hashset_consumed_token_store::HashSetConsumedTokenStore;
pub use postgres_user_store::PostgresUserStore;
pub use redis_consumed_token_store::RedisConsumedTokenStore;

/// Ledgers key tokens by their SHA-256 digest so the bearer string itself is never stored.
pub fn token_fingerprint(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
