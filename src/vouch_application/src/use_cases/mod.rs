pub mod change_password;
pub mod confirm_account;
pub mod login;
pub mod register;
pub mod request_password_reset;
pub mod resend_confirmation;
pub mod reset_password;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export for convenience
pub use change_password::{ChangePasswordError, ChangePasswordUseCase};
pub use confirm_account::{ConfirmAccountError, ConfirmAccountUseCase, ConfirmOutcome};
pub use login::{LoginError, LoginUseCase};
pub use register::{RegisterError, RegisterUseCase};
pub use request_password_reset::{RequestPasswordResetError, RequestPasswordResetUseCase};
pub use resend_confirmation::{ResendConfirmationError, ResendConfirmationUseCase};
pub use reset_password::{ResetPasswordError, ResetPasswordUseCase};
