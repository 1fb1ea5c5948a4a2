mod common;

use auth_core::Claims;
use auth_core::SigningOverrides;
use auth_core::TokenInvalidError;
use auth_core::VerificationOverrides;
use chrono::Duration;
use common::credentials;
use common::email;
use common::service;
use common::user_id;
use identity_service::domain::user::errors::AuthError;

#[tokio::test]
async fn test_full_login_flow() {
    let service = service();

    service
        .register_user(user_id("jaime"), email("jaime@example.com"))
        .await
        .expect("registration failed");
    service
        .update_password(&user_id("jaime"), "correct")
        .await
        .expect("password update failed");

    let (user, token) = service
        .login(&credentials("jaime", "correct"))
        .await
        .expect("login failed");

    assert_eq!(user.id.as_str(), "jaime");
    assert_eq!(user.email.as_str(), "jaime@example.com");

    let claims = service.tokens().verify(&token).expect("token invalid");
    assert_eq!(claims.subject(), Some("jaime"));
    assert_eq!(
        claims.claim("email").and_then(|v| v.as_str()),
        Some("jaime@example.com")
    );
}

#[tokio::test]
async fn test_wrong_password_and_unknown_user_are_distinct_but_opaque() {
    let service = service();

    service
        .register_user(user_id("jaime"), email("jaime@example.com"))
        .await
        .unwrap();
    service
        .update_password(&user_id("jaime"), "correct")
        .await
        .unwrap();

    let wrong_password = service
        .login(&credentials("jaime", "wrong"))
        .await
        .unwrap_err();
    let unknown_user = service
        .login(&credentials("nosuchid", "anything"))
        .await
        .unwrap_err();

    // Distinct kinds for status mapping
    assert!(matches!(wrong_password, AuthError::WrongPassword));
    assert!(matches!(unknown_user, AuthError::UserNotFound));

    // ... but identical rendering, so responses cannot leak which part of
    // the credentials was wrong
    assert_eq!(wrong_password.to_string(), unknown_user.to_string());
}

#[tokio::test]
async fn test_login_before_password_established() {
    let service = service();

    service
        .register_user(user_id("jaime"), email("jaime@example.com"))
        .await
        .unwrap();

    let result = service.login(&credentials("jaime", "anything")).await;
    assert!(matches!(result, Err(AuthError::WrongPassword)));
}

#[tokio::test]
async fn test_duplicate_registration_rejected() {
    let service = service();

    service
        .register_user(user_id("jaime"), email("jaime@example.com"))
        .await
        .unwrap();

    let result = service
        .register_user(user_id("jaime"), email("second@example.com"))
        .await;
    assert!(matches!(result, Err(AuthError::AlreadyExists)));
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let service = service();

    let token = service
        .tokens()
        .issue_with(
            &Claims::new().with_subject("jaime"),
            &SigningOverrides::new().expires_in(Duration::seconds(-2)),
        )
        .expect("issuance failed");

    let result = service.tokens().verify(&token);
    assert!(matches!(result, Err(TokenInvalidError::Expired)));
}

#[tokio::test]
async fn test_tampered_token_rejected() {
    let service = service();

    service
        .register_user(user_id("jaime"), email("jaime@example.com"))
        .await
        .unwrap();
    service
        .update_password(&user_id("jaime"), "correct")
        .await
        .unwrap();
    let (_, token) = service
        .login(&credentials("jaime", "correct"))
        .await
        .unwrap();

    // Flip one character inside the payload segment
    let mut parts: Vec<String> = token.split('.').map(str::to_owned).collect();
    let payload = parts[1].clone();
    let target = payload.chars().nth(5).unwrap();
    let replacement = if target == 'A' { 'B' } else { 'A' };
    parts[1] = format!(
        "{}{}{}",
        &payload[..5],
        replacement,
        &payload[6..]
    );
    let tampered = parts.join(".");

    let result = service.tokens().verify(&tampered);
    assert!(matches!(result, Err(TokenInvalidError::BadSignature)));
}

#[tokio::test]
async fn test_audience_enforcement() {
    let service = service();

    let token = service
        .tokens()
        .issue_with(
            &Claims::new().with_subject("jaime"),
            &SigningOverrides::new().audience(vec!["service-a".to_string()]),
        )
        .expect("issuance failed");

    let result = service.tokens().verify_with(
        &token,
        &VerificationOverrides::new().audience(vec!["service-b".to_string()]),
    );
    assert!(matches!(result, Err(TokenInvalidError::AudienceMismatch)));

    let accepted = service.tokens().verify_with(
        &token,
        &VerificationOverrides::new().audience(vec!["service-a".to_string()]),
    );
    assert!(accepted.is_ok());
}

#[tokio::test]
async fn test_registration_token_flow() {
    let service = service();

    let token = service
        .issue_registration_token(&email("new@example.com"))
        .expect("issuance failed");

    let user = service
        .complete_registration(&token, user_id("newuser"), "first_password")
        .await
        .expect("registration failed");
    assert_eq!(user.email.as_str(), "new@example.com");

    // Registered account can log in with the established password
    let (user, _) = service
        .login(&credentials("newuser", "first_password"))
        .await
        .expect("login failed");
    assert_eq!(user.id.as_str(), "newuser");
}

#[tokio::test]
async fn test_registration_token_is_not_an_access_token() {
    let service = service();

    let token = service
        .issue_registration_token(&email("new@example.com"))
        .expect("issuance failed");

    // Scoped audience: rejected under the default verification policy
    assert!(matches!(
        service.tokens().verify(&token),
        Err(TokenInvalidError::AudienceMismatch)
    ));
}

#[tokio::test]
async fn test_password_reset_flow() {
    let service = service();

    service
        .register_user(user_id("jaime"), email("jaime@example.com"))
        .await
        .unwrap();
    service
        .update_password(&user_id("jaime"), "old_password")
        .await
        .unwrap();

    let token = service
        .issue_password_reset_token(&user_id("jaime"))
        .await
        .expect("issuance failed");
    service
        .reset_password(&token, "new_password")
        .await
        .expect("reset failed");

    // Old password no longer verifies; the new one does
    assert!(matches!(
        service.login(&credentials("jaime", "old_password")).await,
        Err(AuthError::WrongPassword)
    ));
    assert!(service
        .login(&credentials("jaime", "new_password"))
        .await
        .is_ok());
}

#[tokio::test]
async fn test_reset_rejects_plain_access_token() {
    let service = service();

    service
        .register_user(user_id("jaime"), email("jaime@example.com"))
        .await
        .unwrap();
    service
        .update_password(&user_id("jaime"), "correct")
        .await
        .unwrap();
    let (_, access_token) = service
        .login(&credentials("jaime", "correct"))
        .await
        .unwrap();

    let result = service.reset_password(&access_token, "hijacked").await;
    assert!(matches!(
        result,
        Err(AuthError::Token(TokenInvalidError::AudienceMismatch))
    ));
}

#[tokio::test]
async fn test_public_key_export() {
    let service = service();

    let pem = service.tokens().public_key_pem();
    assert!(pem.starts_with("-----BEGIN PUBLIC KEY-----"));
    assert!(pem.trim_end().ends_with("-----END PUBLIC KEY-----"));
}
