use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use thiserror::Error;
use vouch_core::{DEFAULT_TOKEN_TTL_IN_SECONDS, Email, InvalidTokenTtl, TokenTtl, UserError};

use super::constants::{
    CONFIG_DIR, DEFAULT_ENVIRONMENT, defaults,
    env::{ENV_PREFIX, ENV_SEPARATOR, ENVIRONMENT_ENV_VAR, SECRET_KEY_ENV_VAR},
};
use crate::tokens::TokenConfig;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("A token signing secret is required: set tokens.secret or SECRET_KEY")]
    MissingSecret,
    #[error("Invalid token time-to-live: {0}")]
    InvalidTtl(#[from] InvalidTokenTtl),
    #[error("Invalid mail sender: {0}")]
    InvalidSender(UserError),
}

/// Process-wide settings, loaded once at startup and passed to whatever needs them.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub tokens: TokenSettings,
    #[serde(default)]
    pub application: ApplicationSettings,
    #[serde(default)]
    pub email_client: Option<EmailClientSettings>,
    #[serde(default)]
    pub postgres: Option<PostgresSettings>,
    #[serde(default)]
    pub redis: Option<RedisSettings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenSettings {
    pub secret: Secret<String>,
    #[serde(default)]
    pub retired_secret: Option<Secret<String>>,
    #[serde(default = "default_time_to_live")]
    pub time_to_live: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApplicationSettings {
    /// Prefix of the links embedded in outgoing messages.
    pub base_url: String,
    pub mail_subject_prefix: String,
    pub mail_sender: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSettings {
    #[serde(default = "default_email_base_url")]
    pub base_url: String,
    pub auth_token: Secret<String>,
    #[serde(default = "default_email_timeout")]
    pub timeout_in_millis: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    pub url: Secret<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisSettings {
    pub host_name: String,
}

fn default_time_to_live() -> i64 {
    DEFAULT_TOKEN_TTL_IN_SECONDS
}

fn default_email_base_url() -> String {
    defaults::POSTMARK_BASE_URL.to_owned()
}

fn default_email_timeout() -> u64 {
    defaults::EMAIL_TIMEOUT_IN_MILLIS
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            base_url: defaults::BASE_URL.to_owned(),
            mail_subject_prefix: defaults::MAIL_SUBJECT_PREFIX.to_owned(),
            mail_sender: defaults::MAIL_SENDER.to_owned(),
        }
    }
}

impl Settings {
    /// Layers `config/base`, `config/{VOUCH_ENVIRONMENT}`, `VOUCH__*` variables and
    /// finally `SECRET_KEY`. A missing or empty secret is an error, never a default.
    pub fn load() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();

        let environment =
            std::env::var(ENVIRONMENT_ENV_VAR).unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_owned());

        let config = Config::builder()
            .add_source(File::with_name(&format!("{CONFIG_DIR}/base")).required(false))
            .add_source(File::with_name(&format!("{CONFIG_DIR}/{environment}")).required(false))
            .add_source(environment_source())
            .set_override_option("tokens.secret", std::env::var(SECRET_KEY_ENV_VAR).ok())?
            .build()?;

        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> Result<Self, SettingsError> {
        match config.get_string("tokens.secret") {
            Ok(secret) if !secret.is_empty() => {}
            Ok(_) | Err(ConfigError::NotFound(_)) => return Err(SettingsError::MissingSecret),
            Err(e) => return Err(e.into()),
        }

        let settings: Settings = config.try_deserialize()?;
        settings.tokens.ttl()?;
        settings.application.sender()?;

        Ok(settings)
    }
}

/// `VOUCH__SECTION__KEY` variables. Values stay strings so secrets keep their exact text.
fn environment_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_SEPARATOR)
        .separator(ENV_SEPARATOR)
}

impl TokenSettings {
    pub fn token_config(&self) -> TokenConfig {
        TokenConfig {
            secret: self.secret.clone(),
            retired_secret: self
                .retired_secret
                .clone()
                .filter(|s| !s.expose_secret().is_empty()),
        }
    }

    pub fn ttl(&self) -> Result<TokenTtl, InvalidTokenTtl> {
        TokenTtl::from_secs(self.time_to_live)
    }
}

impl ApplicationSettings {
    pub fn sender(&self) -> Result<Email, SettingsError> {
        Email::parse(&self.mail_sender).map_err(SettingsError::InvalidSender)
    }
}

impl EmailClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_millis)
    }
}
