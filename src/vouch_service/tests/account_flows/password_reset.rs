use vouch_application::{ChangePasswordError, LoginError, ResetPasswordError};
use vouch_core::{TokenError, UserStore};

use crate::helpers::{TestApp, email, new_user, password};

#[tokio::test]
async fn test_forgotten_password_flow() {
    let app = TestApp::new();
    let user = app
        .service
        .register(new_user("hana@example.com", "hana", "password123"))
        .await
        .unwrap();

    app.service
        .request_password_reset(email("HANA@example.com"))
        .await
        .unwrap();
    let sent = app.email_client.last_email_to(user.email()).await.unwrap();
    assert_eq!(sent.subject, "[Vouch] Reset Your Password");
    let token = app.token_sent_to(user.email()).await;

    let reset = app
        .service
        .reset_password(&token, password("a fresh password"))
        .await
        .unwrap();
    assert_eq!(reset, user.id());

    let old = app
        .service
        .login(email("hana@example.com"), password("password123"))
        .await;
    assert!(matches!(old, Err(LoginError::InvalidCredentials)));
    app.service
        .login(email("hana@example.com"), password("a fresh password"))
        .await
        .unwrap();

    let replay = app
        .service
        .reset_password(&token, password("attacker password"))
        .await;
    assert!(matches!(replay, Err(ResetPasswordError::AlreadyUsed)));
}

#[tokio::test]
async fn test_reset_request_for_unknown_email_sends_nothing() {
    let app = TestApp::new();

    app.service
        .request_password_reset(email("ghost@example.com"))
        .await
        .unwrap();

    assert!(app.email_client.sent_emails().await.is_empty());
}

#[tokio::test]
async fn test_confirmation_link_cannot_reset_password() {
    let app = TestApp::new();
    let user = app
        .service
        .register(new_user("ivan@example.com", "ivan", "password123"))
        .await
        .unwrap();
    let confirm_token = app.token_sent_to(user.email()).await;

    let result = app
        .service
        .reset_password(&confirm_token, password("a fresh password"))
        .await;

    assert!(matches!(
        result,
        Err(ResetPasswordError::InvalidToken(
            TokenError::PurposeMismatch { .. }
        ))
    ));
}

#[tokio::test]
async fn test_reset_for_deleted_account() {
    let app = TestApp::new();
    let user = app
        .service
        .register(new_user("jane@example.com", "jane", "password123"))
        .await
        .unwrap();
    app.service
        .request_password_reset(email("jane@example.com"))
        .await
        .unwrap();
    let token = app.token_sent_to(user.email()).await;

    app.user_store.delete_user(user.id()).await.unwrap();

    let result = app
        .service
        .reset_password(&token, password("a fresh password"))
        .await;
    assert!(matches!(
        result,
        Err(ResetPasswordError::InvalidToken(TokenError::UnknownSubject(id))) if id == user.id()
    ));
    assert!(app.consumed_tokens.is_empty().await);
}

#[tokio::test]
async fn test_change_password() {
    let app = TestApp::new();
    let user = app
        .service
        .register(new_user("kim@example.com", "kim", "password123"))
        .await
        .unwrap();

    let same = app
        .service
        .change_password(user.id(), password("password123"), password("password123"))
        .await;
    assert!(matches!(same, Err(ChangePasswordError::SamePassword)));

    let wrong = app
        .service
        .change_password(user.id(), password("password999"), password("new password"))
        .await;
    assert!(matches!(wrong, Err(ChangePasswordError::IncorrectPassword)));

    app.service
        .change_password(user.id(), password("password123"), password("new password"))
        .await
        .unwrap();
    app.service
        .login(email("kim@example.com"), password("new password"))
        .await
        .unwrap();
}
