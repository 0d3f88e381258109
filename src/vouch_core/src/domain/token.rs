use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::user::UserId;

/// Default lifetime of confirmation and reset tokens.
pub const DEFAULT_TOKEN_TTL_IN_SECONDS: i64 = 3600;

/// What a token may be used for. Carried as an explicit claim and checked on verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenPurpose {
    Confirm,
    Reset,
}

impl TokenPurpose {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenPurpose::Confirm => "confirm",
            TokenPurpose::Reset => "reset",
        }
    }
}

impl fmt::Display for TokenPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenPurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "confirm" => Ok(TokenPurpose::Confirm),
            "reset" => Ok(TokenPurpose::Reset),
            other => Err(format!("unknown token purpose `{other}`")),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Token time-to-live must be a positive number of seconds, got {0}")]
pub struct InvalidTokenTtl(pub i64);

/// Lifetime of a token in whole seconds. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenTtl(i64);

impl TokenTtl {
    pub fn from_secs(seconds: i64) -> Result<Self, InvalidTokenTtl> {
        if seconds <= 0 {
            return Err(InvalidTokenTtl(seconds));
        }
        Ok(Self(seconds))
    }

    pub fn as_secs(self) -> i64 {
        self.0
    }
}

impl Default for TokenTtl {
    fn default() -> Self {
        Self(DEFAULT_TOKEN_TTL_IN_SECONDS)
    }
}

impl TryFrom<i64> for TokenTtl {
    type Error = InvalidTokenTtl;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_secs(value)
    }
}

/// Opaque, URL-safe token string handed to the notifier.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedToken(String);

impl SignedToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for SignedToken {
    fn from(s: String) -> Self {
        SignedToken(s)
    }
}

impl AsRef<str> for SignedToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Tokens are bearer credentials; keep them out of logs.
impl fmt::Debug for SignedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SignedToken([REDACTED])")
    }
}

/// The verified content of a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub subject: UserId,
    pub purpose: TokenPurpose,
    pub issued_at: i64,
    pub expires_at: i64,
}

impl TokenClaims {
    pub fn new(
        subject: UserId,
        purpose: TokenPurpose,
        issued_at: DateTime<Utc>,
        ttl: TokenTtl,
    ) -> Self {
        let issued_at = issued_at.timestamp();
        Self {
            subject,
            purpose,
            issued_at,
            expires_at: issued_at.saturating_add(ttl.as_secs()),
        }
    }

    /// A token is still valid at the exact second it expires.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() > self.expires_at
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token is malformed")]
    Malformed,
    #[error("Token signature is invalid")]
    BadSignature,
    #[error("Token has expired")]
    Expired,
    #[error("Token was issued for `{found}` but `{expected}` was expected")]
    PurposeMismatch {
        expected: TokenPurpose,
        found: TokenPurpose,
    },
    #[error("Token subject {0} does not exist")]
    UnknownSubject(UserId),
    #[error("Unexpected token error: {0}")]
    Unexpected(String),
}

impl TokenError {
    /// Stable, non-sensitive label for logs and operator output.
    pub fn kind(&self) -> &'static str {
        match self {
            TokenError::Malformed => "malformed",
            TokenError::BadSignature => "bad_signature",
            TokenError::Expired => "expired",
            TokenError::PurposeMismatch { .. } => "purpose_mismatch",
            TokenError::UnknownSubject(_) => "unknown_subject",
            TokenError::Unexpected(_) => "unexpected",
        }
    }
}
