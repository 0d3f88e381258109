pub mod env {
    /// Legacy variable name for the signing key; overrides `tokens.secret`.
    pub const SECRET_KEY_ENV_VAR: &str = "SECRET_KEY";
    /// Selects the `config/{environment}` file layered over `config/base`.
    pub const ENVIRONMENT_ENV_VAR: &str = "VOUCH_ENVIRONMENT";
    pub const ENV_PREFIX: &str = "VOUCH";
    pub const ENV_SEPARATOR: &str = "__";
}

pub const CONFIG_DIR: &str = "config";
pub const DEFAULT_ENVIRONMENT: &str = "development";

pub mod defaults {
    pub const BASE_URL: &str = "http://localhost:5000";
    pub const MAIL_SUBJECT_PREFIX: &str = "[Vouch]";
    pub const MAIL_SENDER: &str = "admin@localhost.localdomain";
    pub const POSTMARK_BASE_URL: &str = "https://api.postmarkapp.com/";
    pub const EMAIL_TIMEOUT_IN_MILLIS: u64 = 10_000;
}
