use std::sync::Arc;

use redis::{Client, RedisResult};
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, postgres::PgPoolOptions};
use thiserror::Error;
use tokio::sync::RwLock;
use vouch_adapters::{
    JwtTokenService, PostmarkEmailClient, RedisConsumedTokenStore, Settings, SettingsError,
    TokenConfigError,
    config::{PostgresSettings, RedisSettings},
};
use vouch_core::InvalidTokenTtl;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("Token service error: {0}")]
    TokenConfig(#[from] TokenConfigError),
    #[error(transparent)]
    InvalidTtl(#[from] InvalidTokenTtl),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("No email client configured")]
    MissingEmailClient,
}

pub fn build_token_service(settings: &Settings) -> Result<JwtTokenService, ServiceError> {
    Ok(JwtTokenService::new(&settings.tokens.token_config())?)
}

/// Create a PostgreSQL connection pool and run pending migrations
pub async fn configure_postgresql(settings: &PostgresSettings) -> Result<PgPool, ServiceError> {
    let pg_pool = get_postgres_pool(&settings.url).await?;

    sqlx::migrate!("../../migrations").run(&pg_pool).await?;

    Ok(pg_pool)
}

pub async fn get_postgres_pool(url: &Secret<String>) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(url.expose_secret())
        .await
}

/// Connect to Redis and wrap the connection in a consumed-token ledger
pub fn configure_redis(settings: &RedisSettings) -> Result<RedisConsumedTokenStore, ServiceError> {
    let connection = get_redis_client(&settings.host_name)?.get_connection()?;
    Ok(RedisConsumedTokenStore::new(Arc::new(RwLock::new(
        connection,
    ))))
}

pub fn get_redis_client(redis_hostname: &str) -> RedisResult<Client> {
    let redis_url = format!("redis://{}/", redis_hostname);
    redis::Client::open(redis_url)
}

/// Build the Postmark client from the `email_client` section
pub fn configure_email_client(settings: &Settings) -> Result<PostmarkEmailClient, ServiceError> {
    let email_settings = settings
        .email_client
        .as_ref()
        .ok_or(ServiceError::MissingEmailClient)?;

    let http_client = reqwest::Client::builder()
        .timeout(email_settings.timeout())
        .build()?;

    Ok(PostmarkEmailClient::new(
        email_settings.base_url.clone(),
        settings.application.sender()?,
        email_settings.auth_token.clone(),
        http_client,
    ))
}
