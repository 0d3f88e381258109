use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    email::Email,
    token::{SignedToken, TokenClaims, TokenError, TokenPurpose, TokenTtl},
    user::UserId,
};

#[derive(Debug, Error)]
pub enum EmailClientError {
    #[error("Failed to send email: {0}")]
    SendFailed(String),
}

/// Port trait for email sending service
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), EmailClientError>;
}

/// Issues and checks signed, expiring, single-purpose tokens.
///
/// Implementations hold only immutable key material, so both operations are
/// synchronous and safe to call from any number of threads at once.
pub trait TokenService: Send + Sync {
    fn issue(
        &self,
        subject: UserId,
        purpose: TokenPurpose,
        ttl: TokenTtl,
    ) -> Result<SignedToken, TokenError>;

    /// Checks signature, then expiry, then purpose, and returns the verified claims.
    fn decode(&self, token: &str, expected: TokenPurpose) -> Result<TokenClaims, TokenError>;

    fn verify(&self, token: &str, expected: TokenPurpose) -> Result<UserId, TokenError> {
        self.decode(token, expected).map(|claims| claims.subject)
    }
}
