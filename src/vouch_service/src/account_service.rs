use vouch_adapters::{JwtTokenService, Settings};
use vouch_application::{
    AccountMessages, ChangePasswordError, ChangePasswordUseCase, ConfirmAccountError,
    ConfirmAccountUseCase, ConfirmOutcome, LoginError, LoginUseCase, RegisterError,
    RegisterUseCase, RequestPasswordResetError, RequestPasswordResetUseCase,
    ResendConfirmationError, ResendConfirmationUseCase, ResetPasswordError, ResetPasswordUseCase,
};
use vouch_core::{
    ConsumedTokenStore, Email, EmailClient, NewUser, Password, TokenTtl, User, UserId, UserStore,
};

use crate::helpers::{ServiceError, build_token_service};

/// Account workflows wired to concrete stores, a token service and an email client.
///
/// Stores are `Clone` through an internal `Arc`, so every call builds its use case
/// from cheap clones instead of holding one of each.
#[derive(Clone)]
pub struct AccountService<U, C, E>
where
    U: UserStore + Clone,
    C: ConsumedTokenStore + Clone,
    E: EmailClient + Clone,
{
    user_store: U,
    consumed_token_store: C,
    email_client: E,
    token_service: JwtTokenService,
    messages: AccountMessages,
    ttl: TokenTtl,
}

impl<U, C, E> AccountService<U, C, E>
where
    U: UserStore + Clone,
    C: ConsumedTokenStore + Clone,
    E: EmailClient + Clone,
{
    pub fn new(
        user_store: U,
        consumed_token_store: C,
        email_client: E,
        token_service: JwtTokenService,
        messages: AccountMessages,
        ttl: TokenTtl,
    ) -> Self {
        Self {
            user_store,
            consumed_token_store,
            email_client,
            token_service,
            messages,
            ttl,
        }
    }

    /// Builds the token service, messages and TTL from loaded settings.
    pub fn from_settings(
        settings: &Settings,
        user_store: U,
        consumed_token_store: C,
        email_client: E,
    ) -> Result<Self, ServiceError> {
        let token_service = build_token_service(settings)?;
        let ttl = settings.tokens.ttl()?;
        let messages = AccountMessages::new(
            settings.application.mail_subject_prefix.clone(),
            settings.application.base_url.clone(),
        );

        Ok(Self::new(
            user_store,
            consumed_token_store,
            email_client,
            token_service,
            messages,
            ttl,
        ))
    }

    pub fn token_service(&self) -> &JwtTokenService {
        &self.token_service
    }

    pub async fn register(&self, new_user: NewUser) -> Result<User, RegisterError> {
        RegisterUseCase::new(
            self.user_store.clone(),
            self.token_service.clone(),
            self.email_client.clone(),
            self.messages.clone(),
            self.ttl,
        )
        .execute(new_user)
        .await
    }

    pub async fn login(&self, email: Email, password: Password) -> Result<User, LoginError> {
        LoginUseCase::new(self.user_store.clone())
            .execute(email, password)
            .await
    }

    pub async fn confirm_account(
        &self,
        user_id: UserId,
        token: &str,
    ) -> Result<ConfirmOutcome, ConfirmAccountError> {
        ConfirmAccountUseCase::new(
            self.user_store.clone(),
            self.token_service.clone(),
            self.consumed_token_store.clone(),
        )
        .execute(user_id, token)
        .await
    }

    pub async fn resend_confirmation(&self, user_id: UserId) -> Result<(), ResendConfirmationError> {
        ResendConfirmationUseCase::new(
            self.user_store.clone(),
            self.token_service.clone(),
            self.email_client.clone(),
            self.messages.clone(),
            self.ttl,
        )
        .execute(user_id)
        .await
    }

    pub async fn change_password(
        &self,
        user_id: UserId,
        old_password: Password,
        new_password: Password,
    ) -> Result<(), ChangePasswordError> {
        ChangePasswordUseCase::new(self.user_store.clone())
            .execute(user_id, old_password, new_password)
            .await
    }

    pub async fn request_password_reset(
        &self,
        email: Email,
    ) -> Result<(), RequestPasswordResetError> {
        RequestPasswordResetUseCase::new(
            self.user_store.clone(),
            self.token_service.clone(),
            self.email_client.clone(),
            self.messages.clone(),
            self.ttl,
        )
        .execute(email)
        .await
    }

    pub async fn reset_password(
        &self,
        token: &str,
        new_password: Password,
    ) -> Result<UserId, ResetPasswordError> {
        ResetPasswordUseCase::new(
            self.user_store.clone(),
            self.token_service.clone(),
            self.consumed_token_store.clone(),
        )
        .execute(token, new_password)
        .await
    }
}
