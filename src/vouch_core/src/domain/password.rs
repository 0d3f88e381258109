use secrecy::{ExposeSecret, Secret};

use super::user::UserError;

/// A plaintext password as submitted by the user. Never stored; stores keep a hash.
///
/// Only emptiness is rejected. Login input has to accept whatever an account was
/// created with, so strength rules are left to the caller.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl Password {
    pub fn parse(raw: Secret<String>) -> Result<Self, UserError> {
        if raw.expose_secret().is_empty() {
            return Err(UserError::InvalidPassword);
        }
        Ok(Self(raw))
    }
}

impl TryFrom<Secret<String>> for Password {
    type Error = UserError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_password_is_accepted() {
        let password = Password::try_from(Secret::from("pw".to_owned())).unwrap();
        assert_eq!(password.as_ref().expose_secret(), "pw");
    }

    #[test]
    fn test_empty_password_is_rejected() {
        let result = Password::try_from(Secret::from(String::new()));
        assert!(matches!(result, Err(UserError::InvalidPassword)));
    }

    #[test]
    fn test_valid_password_is_kept_verbatim() {
        let password = Password::try_from(Secret::from(" spaced password ".to_owned())).unwrap();
        assert_eq!(password.as_ref().expose_secret(), " spaced password ");
    }
}
