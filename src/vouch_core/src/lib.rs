pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    email::Email,
    password::Password,
    token::{
        DEFAULT_TOKEN_TTL_IN_SECONDS, InvalidTokenTtl, SignedToken, TokenClaims, TokenError,
        TokenPurpose, TokenTtl,
    },
    user::{NewUser, User, UserError, UserId},
    username::Username,
};

pub use ports::{
    repositories::{ConsumedTokenStore, ConsumedTokenStoreError, UserStore, UserStoreError},
    services::{EmailClient, EmailClientError, TokenService},
};
