use vouch_core::{
    ConsumedTokenStore, ConsumedTokenStoreError, Password, TokenError, TokenPurpose,
    TokenService, UserId, UserStore, UserStoreError,
};

/// Error types for reset password use case
#[derive(Debug, thiserror::Error)]
pub enum ResetPasswordError {
    #[error("Invalid reset token: {0}")]
    InvalidToken(#[from] TokenError),
    #[error("Reset token has already been used")]
    AlreadyUsed,
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("Consumed token store error: {0}")]
    ConsumedTokenStoreError(#[from] ConsumedTokenStoreError),
}

/// Reset password use case - sets a new password for whoever the reset token names
pub struct ResetPasswordUseCase<U, T, C>
where
    U: UserStore,
    T: TokenService,
    C: ConsumedTokenStore,
{
    user_store: U,
    token_service: T,
    consumed_token_store: C,
}

impl<U, T, C> ResetPasswordUseCase<U, T, C>
where
    U: UserStore,
    T: TokenService,
    C: ConsumedTokenStore,
{
    pub fn new(user_store: U, token_service: T, consumed_token_store: C) -> Self {
        Self {
            user_store,
            token_service,
            consumed_token_store,
        }
    }

    /// Returns the id of the account whose password was replaced.
    #[tracing::instrument(name = "ResetPasswordUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        token: &str,
        new_password: Password,
    ) -> Result<UserId, ResetPasswordError> {
        let claims = self
            .token_service
            .decode(token, TokenPurpose::Reset)
            .inspect_err(|e| tracing::info!(kind = e.kind(), "Rejected reset token"))?;

        let user = match self.user_store.get_user(claims.subject).await {
            Ok(user) => user,
            Err(UserStoreError::UserNotFound) => {
                return Err(TokenError::UnknownSubject(claims.subject).into());
            }
            Err(e) => return Err(e.into()),
        };

        if !self
            .consumed_token_store
            .consume(token, claims.expires_at)
            .await?
        {
            return Err(ResetPasswordError::AlreadyUsed);
        }

        // A failed write must not spend the token.
        if let Err(e) = self.user_store.set_new_password(user.id(), new_password).await {
            if let Err(release_err) = self.consumed_token_store.release(token).await {
                tracing::error!(error = %release_err, "Failed to release reset token");
            }
            return Err(e.into());
        }

        tracing::info!(user_id = %user.id(), "Password reset");
        Ok(user.id())
    }
}
