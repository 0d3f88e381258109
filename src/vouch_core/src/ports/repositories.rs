use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    email::Email,
    password::Password,
    user::{NewUser, User, UserId},
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("Email already registered")]
    EmailAlreadyRegistered,
    #[error("Username already used")]
    UsernameAlreadyTaken,
    #[error("User not found")]
    UserNotFound,
    #[error("Incorrect password")]
    IncorrectPassword,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::EmailAlreadyRegistered, Self::EmailAlreadyRegistered)
                | (Self::UsernameAlreadyTaken, Self::UsernameAlreadyTaken)
                | (Self::UserNotFound, Self::UserNotFound)
                | (Self::IncorrectPassword, Self::IncorrectPassword)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Persistence of account records. Implementations own password hashing:
/// the plaintext `Password` never leaves the store call.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn add_user(&self, user: NewUser) -> Result<User, UserStoreError>;
    async fn get_user(&self, id: UserId) -> Result<User, UserStoreError>;
    async fn get_user_by_email(&self, email: &Email) -> Result<User, UserStoreError>;
    async fn authenticate_user(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<User, UserStoreError>;
    async fn verify_password(&self, id: UserId, password: &Password)
    -> Result<(), UserStoreError>;
    async fn set_confirmed(&self, id: UserId) -> Result<(), UserStoreError>;
    async fn set_new_password(
        &self,
        id: UserId,
        new_password: Password,
    ) -> Result<(), UserStoreError>;
    async fn delete_user(&self, id: UserId) -> Result<(), UserStoreError>;
}

// ConsumedTokenStore port trait and errors
#[derive(Debug, Error)]
pub enum ConsumedTokenStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Ledger of tokens that have already been spent by a workflow.
///
/// Entries only need to outlive the token itself, so `expires_at` (unix seconds)
/// bounds how long an implementation keeps them.
#[async_trait]
pub trait ConsumedTokenStore: Send + Sync {
    /// Records `token` as spent. Returns `false` when it had already been spent.
    async fn consume(&self, token: &str, expires_at: i64) -> Result<bool, ConsumedTokenStoreError>;
    /// Forgets a spent token, so a workflow whose write failed can be retried with it.
    async fn release(&self, token: &str) -> Result<(), ConsumedTokenStoreError>;
    async fn contains_token(&self, token: &str) -> Result<bool, ConsumedTokenStoreError>;
}
