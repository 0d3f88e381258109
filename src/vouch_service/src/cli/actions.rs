use vouch_core::{SignedToken, TokenError, TokenPurpose, TokenService, TokenTtl, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Issue {
        subject: UserId,
        purpose: TokenPurpose,
        ttl: Option<TokenTtl>,
    },
    Verify {
        purpose: TokenPurpose,
        token: String,
    },
}

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Issued(SignedToken),
    Verified(UserId),
}

/// Run an action; `default_ttl` applies when `issue` gets no `--ttl`.
pub fn handle<T: TokenService>(
    action: Action,
    token_service: &T,
    default_ttl: TokenTtl,
) -> Result<Outcome, TokenError> {
    match action {
        Action::Issue {
            subject,
            purpose,
            ttl,
        } => token_service
            .issue(subject, purpose, ttl.unwrap_or(default_ttl))
            .map(Outcome::Issued),
        Action::Verify { purpose, token } => token_service
            .verify(&token, purpose)
            .map(Outcome::Verified),
    }
}
