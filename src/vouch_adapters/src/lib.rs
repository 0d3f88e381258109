pub mod config;
pub mod email;
pub mod persistence;
pub mod tokens;

// Re-export for convenience
pub use self::config::{Settings, SettingsError};
pub use email::{MockEmailClient, PostmarkEmailClient, SentEmail};
pub use persistence::{
    HashMapUserStore, HashSetConsumedTokenStore, PostgresUserStore, RedisConsumedTokenStore,
    token_fingerprint,
};
pub use tokens::{JwtTokenService, TokenConfig, TokenConfigError};
