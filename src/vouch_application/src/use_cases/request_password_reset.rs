use vouch_core::{
    Email, EmailClient, EmailClientError, TokenError, TokenPurpose, TokenService, TokenTtl,
    UserStore, UserStoreError,
};

use crate::messages::AccountMessages;

#[derive(Debug, thiserror::Error)]
pub enum RequestPasswordResetError {
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
    #[error("Email client error: {0}")]
    EmailClientError(#[from] EmailClientError),
}

/// Request password reset use case - mails a reset link if the address is known
pub struct RequestPasswordResetUseCase<U, T, E>
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

impl<U, T, E> RequestPasswordResetUseCase<U, T, E>
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

    /// Succeeds for unknown addresses too, so callers cannot learn which emails have accounts.
    #[tracing::instrument(name = "RequestPasswordResetUseCase::execute", skip_all)]
    pub async fn execute(&self, email: Email) -> Result<(), RequestPasswordResetError> {
        let user = match self.user_store.get_user_by_email(&email).await {
            Ok(user) => user,
            Err(UserStoreError::UserNotFound) => {
                tracing::debug!("Password reset requested for an unknown address");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let token = self
            .token_service
            .issue(user.id(), TokenPurpose::Reset, self.ttl)?;
        let message = self.messages.password_reset(user.username(), &token);

        self.email_client
            .send_email(user.email(), &message.subject, &message.content)
            .await?;

        Ok(())
    }
}
