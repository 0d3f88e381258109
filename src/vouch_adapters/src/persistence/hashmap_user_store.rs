use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use vouch_core::{Email, NewUser, Password, User, UserId, UserStore, UserStoreError};

use super::password_hashing::{compute_password_hash, verify_password_hash};

#[derive(Default)]
struct Users {
    next_id: i64,
    by_id: HashMap<UserId, User>,
}

#[derive(Default, Clone)]
pub struct HashMapUserStore {
    users: Arc<RwLock<Users>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    async fn add_user(&self, user: NewUser) -> Result<User, UserStoreError> {
        // Hash before taking the lock; argon2 is slow on purpose.
        let password_hash = compute_password_hash(user.password)
            .await
            .map_err(UserStoreError::UnexpectedError)?;

        let mut users = self.users.write().await;
        if users.by_id.values().any(|u| u.email() == &user.email) {
            return Err(UserStoreError::EmailAlreadyRegistered);
        }
        if users.by_id.values().any(|u| u.username() == &user.username) {
            return Err(UserStoreError::UsernameAlreadyTaken);
        }

        users.next_id += 1;
        let id = UserId::new(users.next_id);
        let stored = User::new(id, user.email, user.username, password_hash, false);
        users.by_id.insert(id, stored.clone());
        Ok(stored)
    }

    async fn get_user(&self, id: UserId) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .by_id
            .get(&id)
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn get_user_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .by_id
            .values()
            .find(|u| u.email() == email)
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn authenticate_user(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<User, UserStoreError> {
        let user = self.get_user_by_email(email).await?;

        verify_password_hash(user.password_hash().clone(), password.clone())
            .await
            .map_err(|_| UserStoreError::IncorrectPassword)?;

        Ok(user)
    }

    async fn verify_password(
        &self,
        id: UserId,
        password: &Password,
    ) -> Result<(), UserStoreError> {
        let user = self.get_user(id).await?;

        verify_password_hash(user.password_hash().clone(), password.clone())
            .await
            .map_err(|_| UserStoreError::IncorrectPassword)
    }

    async fn set_confirmed(&self, id: UserId) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let user = users.by_id.get_mut(&id).ok_or(UserStoreError::UserNotFound)?;
        user.confirm();
        Ok(())
    }

    async fn set_new_password(
        &self,
        id: UserId,
        new_password: Password,
    ) -> Result<(), UserStoreError> {
        let password_hash = compute_password_hash(new_password)
            .await
            .map_err(UserStoreError::UnexpectedError)?;

        let mut users = self.users.write().await;
        let user = users.by_id.get_mut(&id).ok_or(UserStoreError::UserNotFound)?;
        user.set_password_hash(password_hash);
        Ok(())
    }

    async fn delete_user(&self, id: UserId) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        users.by_id.remove(&id).ok_or(UserStoreError::UserNotFound)?;
        Ok(())
    }
}
