use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::user::UserError;

const MAX_USERNAME_LENGTH: usize = 64;

static USERNAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_.]*$").expect("username pattern is a valid regex")
});

/// Public handle of an account: letters, digits, dots or underscores, starting with a letter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub fn parse(raw: &str) -> Result<Self, UserError> {
        let raw = raw.trim();

        if raw.chars().count() > MAX_USERNAME_LENGTH || !USERNAME_PATTERN.is_match(raw) {
            return Err(UserError::InvalidUsername);
        }

        Ok(Self(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
