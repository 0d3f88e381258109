use vouch_core::{Email, Password, User, UserStore, UserStoreError};

/// Error types specific to login use case
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// Unknown email and wrong password are reported the same way.
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
}

impl From<UserStoreError> for LoginError {
    fn from(e: UserStoreError) -> Self {
        match e {
            UserStoreError::UserNotFound | UserStoreError::IncorrectPassword => {
                LoginError::InvalidCredentials
            }
            other => LoginError::UserStoreError(other),
        }
    }
}

/// Login use case - checks credentials and hands the account to the session layer
pub struct LoginUseCase<U>
where
    U: UserStore,
{
    user_store: U,
}

impl<U> LoginUseCase<U>
where
    U: UserStore,
{
    pub fn new(user_store: U) -> Self {
        Self { user_store }
    }

    /// Returns the authenticated user; callers decide what an unconfirmed account may do.
    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, password))]
    pub async fn execute(&self, email: Email, password: Password) -> Result<User, LoginError> {
        let user = self.user_store.authenticate_user(&email, &password).await?;
        Ok(user)
    }
}
