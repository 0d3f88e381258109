use vouch_core::{
    EmailClient, EmailClientError, NewUser, TokenError, TokenPurpose, TokenService, TokenTtl,
    User, UserStore, UserStoreError,
};

use crate::messages::AccountMessages;

/// Error types specific to the register use case
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
    #[error("Email client error: {0}")]
    EmailClientError(#[from] EmailClientError),
}

/// Register use case - creates an unconfirmed account and mails a confirmation link
pub struct RegisterUseCase<U, T, E>
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

impl<U, T, E> RegisterUseCase<U, T, E>
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

    /// Execute the register use case
    ///
    /// The account is stored before the email goes out, so a delivery failure
    /// leaves an unconfirmed account that can ask for the link again.
    #[tracing::instrument(name = "RegisterUseCase::execute", skip_all)]
    pub async fn execute(&self, new_user: NewUser) -> Result<User, RegisterError> {
        let user = self.user_store.add_user(new_user).await?;

        let token = self
            .token_service
            .issue(user.id(), TokenPurpose::Confirm, self.ttl)?;
        let message = self.messages.confirmation(user.username(), &token);

        self.email_client
            .send_email(user.email(), &message.subject, &message.content)
            .await?;

        tracing::info!(user_id = %user.id(), "Registered new account");
        Ok(user)
    }
}
