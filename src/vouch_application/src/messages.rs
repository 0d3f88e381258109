use vouch_core::{SignedToken, TokenPurpose, Username};

const CONFIRM_SUBJECT: &str = "Confirm your account";
const RESET_SUBJECT: &str = "Reset Your Password";

/// Subject and body of an outgoing account email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountMessage {
    pub subject: String,
    pub content: String,
}

/// Renders the confirmation and password reset emails.
#[derive(Debug, Clone)]
pub struct AccountMessages {
    subject_prefix: String,
    base_url: String,
}

impl AccountMessages {
    pub fn new(subject_prefix: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            subject_prefix: subject_prefix.into(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// `{base_url}/auth/confirm/{token}` or `{base_url}/auth/reset/{token}`.
    pub fn link(&self, purpose: TokenPurpose, token: &SignedToken) -> String {
        format!("{}/auth/{}/{}", self.base_url, purpose, token.as_str())
    }

    pub fn confirmation(&self, username: &Username, token: &SignedToken) -> AccountMessage {
        let link = self.link(TokenPurpose::Confirm, token);
        AccountMessage {
            subject: self.subject(CONFIRM_SUBJECT),
            content: format!(
                "Dear {username},\n\n\
                 Welcome! To confirm your account please follow this link:\n\n\
                 {link}\n\n\
                 Note: replies to this email address are not monitored."
            ),
        }
    }

    pub fn password_reset(&self, username: &Username, token: &SignedToken) -> AccountMessage {
        let link = self.link(TokenPurpose::Reset, token);
        AccountMessage {
            subject: self.subject(RESET_SUBJECT),
            content: format!(
                "Dear {username},\n\n\
                 To reset your password follow this link:\n\n\
                 {link}\n\n\
                 If you have not requested a password reset simply ignore this message.\n\n\
                 Note: replies to this email address are not monitored."
            ),
        }
    }

    fn subject(&self, subject: &str) -> String {
        if self.subject_prefix.is_empty() {
            subject.to_owned()
        } else {
            format!("{} {subject}", self.subject_prefix)
        }
    }
}
