use vouch_application::{ConfirmAccountError, ConfirmOutcome, LoginError};
use vouch_core::{ConsumedTokenStore, TokenError, TokenPurpose, TokenService};

use crate::helpers::{TestApp, email, new_user, password};

#[tokio::test]
async fn test_register_login_and_confirm() {
    let app = TestApp::new();

    let user = app
        .service
        .register(new_user("Carol@Example.com", "carol", "password123"))
        .await
        .unwrap();
    let sent = app.email_client.last_email_to(user.email()).await.unwrap();
    assert_eq!(sent.subject, "[Vouch] Confirm your account");
    assert!(sent.content.contains("https://accounts.vouch.test/auth/confirm/"));

    let signed_in = app
        .service
        .login(email("carol@example.com"), password("password123"))
        .await
        .unwrap();
    assert!(!signed_in.is_confirmed());

    let token = app.token_sent_to(user.email()).await;
    let outcome = app.service.confirm_account(signed_in.id(), &token).await;
    assert_eq!(outcome.unwrap(), ConfirmOutcome::Confirmed);

    let signed_in = app
        .service
        .login(email("carol@example.com"), password("password123"))
        .await
        .unwrap();
    assert!(signed_in.is_confirmed());

    // A second visit to the same link is harmless.
    let outcome = app.service.confirm_account(signed_in.id(), &token).await;
    assert_eq!(outcome.unwrap(), ConfirmOutcome::AlreadyConfirmed);
}

#[tokio::test]
async fn test_confirmation_token_is_spent_once() {
    let app = TestApp::new();
    let user = app
        .service
        .register(new_user("dave@example.com", "dave", "password123"))
        .await
        .unwrap();
    let token = app.token_sent_to(user.email()).await;

    app.service.confirm_account(user.id(), &token).await.unwrap();

    assert!(app.consumed_tokens.contains_token(&token).await.unwrap());
    assert_eq!(app.consumed_tokens.len().await, 1);
}

#[tokio::test]
async fn test_resent_link_confirms_and_old_link_still_verifies() {
    let app = TestApp::new();
    let user = app
        .service
        .register(new_user("erin@example.com", "erin", "password123"))
        .await
        .unwrap();
    let first = app.token_sent_to(user.email()).await;

    app.service.resend_confirmation(user.id()).await.unwrap();
    let second = app.token_sent_to(user.email()).await;
    assert_eq!(app.email_client.sent_emails().await.len(), 2);

    // Both links are signed for the same account until one is spent.
    assert_eq!(
        app.service
            .token_service()
            .verify(&first, TokenPurpose::Confirm),
        Ok(user.id())
    );

    app.service.confirm_account(user.id(), &second).await.unwrap();
    assert!(app.is_confirmed(user.id()).await);
}

#[tokio::test]
async fn test_tampered_link_is_rejected() {
    let app = TestApp::new();
    let user = app
        .service
        .register(new_user("frank@example.com", "frank", "password123"))
        .await
        .unwrap();
    let token = app.token_sent_to(user.email()).await;

    // Flip one character of the signature segment.
    let mut tampered = token.into_bytes();
    let last = tampered.len() - 2;
    tampered[last] = if tampered[last] == b'A' { b'B' } else { b'A' };
    let tampered = String::from_utf8(tampered).unwrap();

    let result = app.service.confirm_account(user.id(), &tampered).await;
    assert!(matches!(
        result,
        Err(ConfirmAccountError::InvalidToken(
            TokenError::BadSignature | TokenError::Malformed
        ))
    ));
    assert!(!app.is_confirmed(user.id()).await);
}

#[tokio::test]
async fn test_login_rejects_wrong_password() {
    let app = TestApp::new();
    app.service
        .register(new_user("gina@example.com", "gina", "password123"))
        .await
        .unwrap();

    let result = app
        .service
        .login(email("gina@example.com"), password("password124"))
        .await;
    assert!(matches!(result, Err(LoginError::InvalidCredentials)));
}
