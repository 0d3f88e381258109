use vouch_core::{Password, UserId, UserStore, UserStoreError};

/// Error types for change password use case
#[derive(Debug, thiserror::Error)]
pub enum ChangePasswordError {
    #[error("Incorrect password")]
    IncorrectPassword,
    #[error("New password must differ from the old one")]
    SamePassword,
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
}

impl From<UserStoreError> for ChangePasswordError {
    fn from(e: UserStoreError) -> Self {
        match e {
            UserStoreError::IncorrectPassword => ChangePasswordError::IncorrectPassword,
            other => ChangePasswordError::UserStoreError(other),
        }
    }
}

/// Change password use case - replaces the password of a signed-in user
pub struct ChangePasswordUseCase<U>
where
    U: UserStore,
{
    user_store: U,
}

impl<U> ChangePasswordUseCase<U>
where
    U: UserStore,
{
    pub fn new(user_store: U) -> Self {
        Self { user_store }
    }

    /// Execute the change password use case
    ///
    /// # Arguments
    /// * `user_id` - The signed-in user
    /// * `old_password` - Must match the stored hash
    /// * `new_password` - The new password to set
    #[tracing::instrument(
        name = "ChangePasswordUseCase::execute",
        skip(self, old_password, new_password)
    )]
    pub async fn execute(
        &self,
        user_id: UserId,
        old_password: Password,
        new_password: Password,
    ) -> Result<(), ChangePasswordError> {
        self.user_store
            .verify_password(user_id, &old_password)
            .await?;

        if old_password == new_password {
            return Err(ChangePasswordError::SamePassword);
        }

        self.user_store
            .set_new_password(user_id, new_password)
            .await?;

        Ok(())
    }
}
