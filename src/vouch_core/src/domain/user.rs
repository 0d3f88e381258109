use std::fmt;
use std::str::FromStr;

use secrecy::Secret;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{email::Email, password::Password, username::Username};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserError {
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Username must start with a letter and contain only letters, numbers, dots or underscores")]
    InvalidUsername,
    #[error("Password must not be empty")]
    InvalidPassword,
    #[error("Invalid user id")]
    InvalidUserId,
}

/// Identifier assigned to an account by the user store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl FromStr for UserId {
    type Err = UserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .map(Self)
            .map_err(|_| UserError::InvalidUserId)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registration input; the store assigns the id and hashes the password.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Email,
    pub username: Username,
    pub password: Password,
}

/// An account record as held by the user store.
#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    email: Email,
    username: Username,
    password_hash: Secret<String>,
    confirmed: bool,
}

impl User {
    pub fn new(
        id: UserId,
        email: Email,
        username: Username,
        password_hash: Secret<String>,
        confirmed: bool,
    ) -> Self {
        Self {
            id,
            email,
            username,
            password_hash,
            confirmed,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    /// PHC-formatted password hash.
    pub fn password_hash(&self) -> &Secret<String> {
        &self.password_hash
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    pub fn set_password_hash(&mut self, password_hash: Secret<String>) {
        self.password_hash = password_hash;
    }

    pub fn confirm(&mut self) {
        self.confirmed = true;
    }
}
