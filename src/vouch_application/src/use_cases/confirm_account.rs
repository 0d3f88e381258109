use vouch_core::{
    ConsumedTokenStore, ConsumedTokenStoreError, TokenError, TokenPurpose, TokenService, UserId,
    UserStore, UserStoreError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Confirmed,
    AlreadyConfirmed,
}

/// Error types for confirm account use case
#[derive(Debug, thiserror::Error)]
pub enum ConfirmAccountError {
    #[error("Invalid confirmation token: {0}")]
    InvalidToken(#[from] TokenError),
    #[error("Confirmation token belongs to another account")]
    SubjectMismatch,
    #[error("Confirmation token has already been used")]
    AlreadyUsed,
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("Consumed token store error: {0}")]
    ConsumedTokenStoreError(#[from] ConsumedTokenStoreError),
}

/// Confirm account use case - marks the signed-in user as confirmed
pub struct ConfirmAccountUseCase<U, T, C>
where
    U: UserStore,
    T: TokenService,
    C: ConsumedTokenStore,
{
    user_store: U,
    token_service: T,
    consumed_token_store: C,
}

impl<U, T, C> ConfirmAccountUseCase<U, T, C>
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

    /// Execute the confirm account use case
    ///
    /// # Arguments
    /// * `user_id` - The signed-in user
    /// * `token` - Token taken from the confirmation link
    #[tracing::instrument(name = "ConfirmAccountUseCase::execute", skip(self, token))]
    pub async fn execute(
        &self,
        user_id: UserId,
        token: &str,
    ) -> Result<ConfirmOutcome, ConfirmAccountError> {
        let user = self.user_store.get_user(user_id).await?;
        if user.is_confirmed() {
            return Ok(ConfirmOutcome::AlreadyConfirmed);
        }

        let claims = self
            .token_service
            .decode(token, TokenPurpose::Confirm)
            .inspect_err(|e| tracing::info!(kind = e.kind(), "Rejected confirmation token"))?;

        if claims.subject != user.id() {
            return Err(ConfirmAccountError::SubjectMismatch);
        }

        if !self
            .consumed_token_store
            .consume(token, claims.expires_at)
            .await?
        {
            return Err(ConfirmAccountError::AlreadyUsed);
        }

        // A failed write must not spend the token.
        if let Err(e) = self.user_store.set_confirmed(user.id()).await {
            if let Err(release_err) = self.consumed_token_store.release(token).await {
                tracing::error!(error = %release_err, "Failed to release confirmation token");
            }
            return Err(e.into());
        }

        Ok(ConfirmOutcome::Confirmed)
    }
}
