use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use secrecy::Secret;
use vouch_adapters::{HashMapUserStore, JwtTokenService, TokenConfig};
use vouch_core::{Email, NewUser, Password, User, UserId, UserStore, UserStoreError, Username};

use crate::messages::AccountMessages;

pub(crate) const BASE_URL: &str = "https://vouch.test";

pub(crate) fn email(raw: &str) -> Email {
    Email::parse(raw).unwrap()
}

pub(crate) fn password(raw: &str) -> Password {
    Password::try_from(Secret::from(raw.to_owned())).unwrap()
}

pub(crate) fn new_user(raw_email: &str, username: &str, raw_password: &str) -> NewUser {
    NewUser {
        email: email(raw_email),
        username: Username::parse(username).unwrap(),
        password: password(raw_password),
    }
}

pub(crate) fn token_service() -> JwtTokenService {
    JwtTokenService::new(&TokenConfig::new(Secret::from(
        "application-test-secret".to_owned(),
    )))
    .unwrap()
}

pub(crate) fn messages() -> AccountMessages {
    AccountMessages::new("[Vouch]", BASE_URL)
}

pub(crate) async fn registered_user(store: &HashMapUserStore) -> User {
    store
        .add_user(new_user("alice@example.com", "alice", "password123"))
        .await
        .unwrap()
}

/// Pulls the token back out of the link in an email body.
pub(crate) fn token_from(content: &str) -> String {
    content
        .lines()
        .find(|line| line.starts_with(BASE_URL))
        .and_then(|link| link.rsplit('/').next())
        .unwrap()
        .to_owned()
}

/// Wraps the in-memory store; while `fail_writes` is on, confirm and password
/// updates fail as a dropped database connection would.
#[derive(Clone)]
pub(crate) struct FlakyUserStore {
    inner: HashMapUserStore,
    failing: Arc<AtomicBool>,
}

impl FlakyUserStore {
    pub(crate) fn new(inner: HashMapUserStore) -> Self {
        Self {
            inner,
            failing: Arc::new(AtomicBool::new(false)),
        }
    }

    pub(crate) fn fail_writes(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), UserStoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(UserStoreError::UnexpectedError(
                "connection reset".to_owned(),
            ));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl UserStore for FlakyUserStore {
    async fn add_user(&self, user: NewUser) -> Result<User, UserStoreError> {
        self.inner.add_user(user).await
    }

    async fn get_user(&self, id: UserId) -> Result<User, UserStoreError> {
        self.inner.get_user(id).await
    }

    async fn get_user_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        self.inner.get_user_by_email(email).await
    }

    async fn authenticate_user(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<User, UserStoreError> {
        self.inner.authenticate_user(email, password).await
    }

    async fn verify_password(
        &self,
        id: UserId,
        password: &Password,
    ) -> Result<(), UserStoreError> {
        self.inner.verify_password(id, password).await
    }

    async fn set_confirmed(&self, id: UserId) -> Result<(), UserStoreError> {
        self.check()?;
        self.inner.set_confirmed(id).await
    }

    async fn set_new_password(
        &self,
        id: UserId,
        new_password: Password,
    ) -> Result<(), UserStoreError> {
        self.check()?;
        self.inner.set_new_password(id, new_password).await
    }

    async fn delete_user(&self, id: UserId) -> Result<(), UserStoreError> {
        self.inner.delete_user(id).await
    }
}
