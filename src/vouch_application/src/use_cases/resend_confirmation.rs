use vouch_core::{
    EmailClient, EmailClientError, TokenError, TokenPurpose, TokenService, TokenTtl, UserId,
    UserStore, UserStoreError,
};

use crate::messages::AccountMessages;

#[derive(Debug, thiserror::Error)]
pub enum ResendConfirmationError {
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
    #[error("Email client error: {0}")]
    EmailClientError(#[from] EmailClientError),
}

/// Resend confirmation use case - mails a fresh confirmation link to the signed-in user
pub struct ResendConfirmationUseCase<U, T, E>
where
    U: UserStore,
    T: TokenService,
    E: EmailClient,
{
    user_store: U,
    token_service: T,
    email_client: E,
    messages: AccountMessages,
    ttl: TokenTtl,
}

impl<U, T, E> ResendConfirmationUseCase<U, T, E>
where
    U: UserStore,
    T: TokenService,
    E: EmailClient,
{
    pub fn new(
        user_store: U,
        token_service: T,
        email_client: E,
        messages: AccountMessages,
        ttl: TokenTtl,
    ) -> Self {
        Self {
            user_store,
            token_service,
            email_client,
            messages,
            ttl,
        }
    }

    #[tracing::instrument(name = "ResendConfirmationUseCase::execute", skip(self))]
    pub async fn execute(&self, user_id: UserId) -> Result<(), ResendConfirmationError> {
        let user = self.user_store.get_user(user_id).await?;

        let token = self
            .token_service
            .issue(user.id(), TokenPurpose::Confirm, self.ttl)?;
        let message = self.messages.confirmation(user.username(), &token);

        self.email_client
            .send_email(user.email(), &message.subject, &message.content)
            .await?;

        Ok(())
    }
}
