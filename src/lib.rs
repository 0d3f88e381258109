//! # Vouch - Account Token Library
//!
//! Facade crate re-exporting the public APIs of the vouch components: signed,
//! expiring, single-purpose tokens for account confirmation and password reset,
//! plus the account workflows built on them.
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `User`, `TokenClaims`, etc.
//! - **Ports**: `UserStore`, `ConsumedTokenStore`, `EmailClient`, `TokenService`
//! - **Use cases**: `RegisterUseCase`, `ConfirmAccountUseCase`, `ResetPasswordUseCase`, etc.
//! - **Adapters**: `JwtTokenService`, `PostgresUserStore`, `RedisConsumedTokenStore`, etc.
//! - **Service**: `AccountService` - every workflow wired to concrete adapters

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use vouch_core::*;
}

pub use vouch_core::{
    Email, NewUser, Password, SignedToken, TokenClaims, TokenError, TokenPurpose, TokenTtl, User,
    UserError, UserId, Username,
};

// ============================================================================
// Ports
// ============================================================================

pub use vouch_core::{
    ConsumedTokenStore, ConsumedTokenStoreError, EmailClient, EmailClientError, TokenService,
    UserStore, UserStoreError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use vouch_application::*;
}

pub use vouch_application::{
    AccountMessages, ChangePasswordUseCase, ConfirmAccountUseCase, ConfirmOutcome, LoginUseCase,
    RegisterUseCase, RequestPasswordResetUseCase, ResendConfirmationUseCase, ResetPasswordUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    pub use vouch_adapters::{config, email, persistence, tokens};
}

pub use vouch_adapters::{
    HashMapUserStore, HashSetConsumedTokenStore, JwtTokenService, MockEmailClient,
    PostgresUserStore, PostmarkEmailClient, RedisConsumedTokenStore, Settings, TokenConfig,
};

// ============================================================================
// Account Service (Main Entry Point)
// ============================================================================

pub use vouch_service::{
    AccountService, ServiceError, configure_email_client, configure_postgresql, configure_redis,
    get_redis_client, init_tracing,
};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};
