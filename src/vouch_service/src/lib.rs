mod account_service;
pub mod cli;
mod helpers;
mod telemetry;

pub use account_service::AccountService;
pub use helpers::{
    ServiceError, build_token_service, configure_email_client, configure_postgresql,
    configure_redis, get_postgres_pool, get_redis_client,
};
pub use telemetry::init_tracing;

// Re-export commonly used types
pub use vouch_core::{ConsumedTokenStore, Email, EmailClient, TokenService, UserStore};
