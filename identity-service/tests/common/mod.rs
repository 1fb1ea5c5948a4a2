use std::sync::Arc;

use auth_core::KeyManager;
use auth_core::SigningOptions;
use auth_core::TokenService;
use chrono::Duration;
use identity_service::domain::user::models::Credentials;
use identity_service::domain::user::models::EmailAddress;
use identity_service::domain::user::models::UserId;
use identity_service::domain::user::service::AuthService;
use identity_service::outbound::repositories::InMemoryUserStore;
use once_cell::sync::Lazy;

/// One key pair for the whole suite; generation is the expensive part.
static KEYS: Lazy<Arc<KeyManager>> =
    Lazy::new(|| Arc::new(KeyManager::generate_default().expect("test key generation")));

static TRACING: Lazy<()> = Lazy::new(|| {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init()
        .ok();
});

/// Fresh service over an empty in-memory store.
pub fn service() -> AuthService<InMemoryUserStore> {
    Lazy::force(&TRACING);

    let tokens = Arc::new(TokenService::with_defaults(
        KEYS.clone(),
        SigningOptions::new(
            "identity-service",
            vec!["identity-service".to_string()],
            Duration::minutes(10),
        ),
    ));
    AuthService::new(Arc::new(InMemoryUserStore::new()), tokens)
}

pub fn user_id(id: &str) -> UserId {
    UserId::new(id.to_string()).expect("valid user id")
}

pub fn email(address: &str) -> EmailAddress {
    EmailAddress::new(address.to_string()).expect("valid email")
}

pub fn credentials(id: &str, password: &str) -> Credentials {
    Credentials::new(user_id(id), password)
}
