use secrecy::Secret;
use vouch_adapters::{JwtTokenService, TokenConfig};
use vouch_application::{AccountMessages, ConfirmAccountError, ConfirmOutcome};
use vouch_core::{TokenError, TokenTtl};
use vouch_service::AccountService;

use crate::helpers::{BASE_URL, SECRET, TestApp, new_user};

fn rotated_config() -> TokenConfig {
    TokenConfig {
        secret: Secret::from("the-next-secret".to_owned()),
        retired_secret: Some(Secret::from(SECRET.to_owned())),
    }
}

#[tokio::test]
async fn test_link_survives_key_rotation() {
    let before = TestApp::new();
    let user = before
        .service
        .register(new_user("lena@example.com", "lena", "password123"))
        .await
        .unwrap();
    let token = before.token_sent_to(user.email()).await;

    // Same accounts, new signing key, old key kept for verification.
    let after = AccountService::new(
        before.user_store.clone(),
        before.consumed_tokens.clone(),
        before.email_client.clone(),
        JwtTokenService::new(&rotated_config()).unwrap(),
        AccountMessages::new("[Vouch]", BASE_URL),
        TokenTtl::default(),
    );

    let outcome = after.confirm_account(user.id(), &token).await;
    assert_eq!(outcome.unwrap(), ConfirmOutcome::Confirmed);
    assert!(before.is_confirmed(user.id()).await);
}

#[tokio::test]
async fn test_link_rejected_once_old_key_is_dropped() {
    let before = TestApp::new();
    let user = before
        .service
        .register(new_user("mia@example.com", "mia", "password123"))
        .await
        .unwrap();
    let token = before.token_sent_to(user.email()).await;

    let after = TestApp::with_token_config(TokenConfig::new(Secret::from(
        "the-next-secret".to_owned(),
    )));
    let user = after
        .service
        .register(new_user("mia@example.com", "mia", "password123"))
        .await
        .unwrap();

    let result = after.service.confirm_account(user.id(), &token).await;
    assert!(matches!(
        result,
        Err(ConfirmAccountError::InvalidToken(TokenError::BadSignature))
    ));
}
