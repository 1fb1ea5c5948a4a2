use std::sync::Arc;

use auth_core::Claims;
use auth_core::PasswordHasher;
use auth_core::SigningOverrides;
use auth_core::TokenInvalidError;
use auth_core::TokenService;
use auth_core::VerificationOverrides;
use chrono::Duration;
use uuid::Uuid;

use crate::domain::user::errors::AuthError;
use crate::domain::user::models::AuthenticatedUser;
use crate::domain::user::models::Credentials;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserRecord;
use crate::domain::user::ports::UserStore;

/// Audience restricting a token to completing a registration.
pub const REGISTRATION_AUDIENCE: &str = "registration";

/// Audience restricting a token to resetting a password.
pub const PASSWORD_RESET_AUDIENCE: &str = "password-reset";

/// Private claim naming what a one-time token permits.
const PERMISSIONS_CLAIM: &str = "permissions";

/// Lifetime of single-purpose registration and reset tokens.
const ONE_TIME_TOKEN_MINUTES: i64 = 10;

/// Credential verification and account lifecycle service.
///
/// Verifies supplied credentials against stored records and exchanges them
/// for signed access tokens through the injected [`TokenService`]. Every
/// call is stateless; the only shared state is the store behind the port
/// and the read-only key pair inside the token service.
///
/// Hashing and signing are synchronous CPU-bound work. Callers running on
/// a single-threaded executor can move these calls onto a blocking pool;
/// correctness does not depend on it, only latency.
pub struct AuthService<S>
where
    S: UserStore,
{
    store: Arc<S>,
    tokens: Arc<TokenService>,
    password_hasher: PasswordHasher,
}

impl<S> AuthService<S>
where
    S: UserStore,
{
    /// Create a new service with the standard password cost tier.
    pub fn new(store: Arc<S>, tokens: Arc<TokenService>) -> Self {
        Self {
            store,
            tokens,
            password_hasher: PasswordHasher::new(),
        }
    }

    /// Create a service with an explicitly configured password hasher.
    pub fn with_hasher(store: Arc<S>, tokens: Arc<TokenService>, hasher: PasswordHasher) -> Self {
        Self {
            store,
            tokens,
            password_hasher: hasher,
        }
    }

    /// The bound token service, for callers that verify tokens on protected
    /// requests or export the public key.
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Verify a credential pair against the stored record.
    ///
    /// Fetches the record, compares the password against the stored hash,
    /// and returns the record with the hash stripped. A record that has no
    /// hash established yet rejects like a password mismatch.
    ///
    /// # Errors
    /// * `UserNotFound` - No record for this identifier
    /// * `WrongPassword` - Password does not match the stored hash
    /// * `Password` / `Storage` - Infrastructure failure, distinct from both
    pub async fn verify_credentials(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthenticatedUser, AuthError> {
        let record = self
            .store
            .get_user(&credentials.id)
            .await?
            .ok_or_else(|| {
                tracing::debug!(user = %credentials.id, "login rejected: unknown user");
                AuthError::UserNotFound
            })?;

        let Some(stored_hash) = record.password_hash.as_deref() else {
            tracing::debug!(user = %record.id, "login rejected: no password established");
            return Err(AuthError::WrongPassword);
        };

        if self
            .password_hasher
            .verify(&credentials.password, stored_hash)?
        {
            Ok(record.into())
        } else {
            tracing::debug!(user = %credentials.id, "login rejected: password mismatch");
            Err(AuthError::WrongPassword)
        }
    }

    /// Exchange credentials for a signed access token.
    ///
    /// Composition of [`Self::verify_credentials`] and token issuance: the
    /// token's subject is the user id and the email travels as a private
    /// claim.
    pub async fn login(
        &self,
        credentials: &Credentials,
    ) -> Result<(AuthenticatedUser, String), AuthError> {
        let user = self.verify_credentials(credentials).await?;

        let claims = Claims::new()
            .with_subject(user.id.as_str())
            .with_claim("email", user.email.as_str());
        let token = self.tokens.issue(&claims)?;

        tracing::debug!(user = %user.id, "issued access token");
        Ok((user, token))
    }

    /// Create a new account with no password established.
    ///
    /// The record cannot authenticate until [`Self::update_password`] runs.
    pub async fn register_user(
        &self,
        id: UserId,
        email: EmailAddress,
    ) -> Result<UserRecord, AuthError> {
        let record = UserRecord::new(id, email);
        self.store.insert_user(record.clone()).await?;

        tracing::debug!(user = %record.id, "registered new user");
        Ok(record)
    }

    /// Hash a password and store it for an existing account.
    pub async fn update_password(&self, id: &UserId, password: &str) -> Result<(), AuthError> {
        let hash = self.password_hasher.hash(password)?;
        self.store.update_hash(id, hash).await?;

        tracing::debug!(user = %id, "password hash updated");
        Ok(())
    }

    /// Issue a short-lived token that only permits completing a
    /// registration for the given email address.
    ///
    /// Dispatching the token (e.g. by mail) is the caller's concern.
    pub fn issue_registration_token(&self, email: &EmailAddress) -> Result<String, AuthError> {
        let claims = Claims::new()
            .with_subject(email.as_str())
            .with_token_id(Uuid::new_v4());

        let token = self.tokens.issue_with(
            &claims,
            &SigningOverrides::new()
                .audience(vec![REGISTRATION_AUDIENCE.to_string()])
                .expires_in(Duration::minutes(ONE_TIME_TOKEN_MINUTES)),
        )?;
        Ok(token)
    }

    /// Complete a registration started with [`Self::issue_registration_token`].
    ///
    /// Verifies the token under the registration audience, creates the
    /// account for the email the token was issued to, and establishes the
    /// password.
    pub async fn complete_registration(
        &self,
        token: &str,
        id: UserId,
        password: &str,
    ) -> Result<AuthenticatedUser, AuthError> {
        let claims = self.tokens.verify_with(
            token,
            &VerificationOverrides::new().audience(vec![REGISTRATION_AUDIENCE.to_string()]),
        )?;

        let email = claims.subject().ok_or_else(|| {
            AuthError::Token(TokenInvalidError::Malformed(
                "registration token has no subject".to_string(),
            ))
        })?;
        let email = EmailAddress::new(email.to_string())?;

        let record = self.register_user(id, email).await?;
        self.update_password(&record.id, password).await?;

        Ok(record.into())
    }

    /// Issue a short-lived token that only permits resetting the password
    /// of an existing account.
    ///
    /// Dispatching the token is the caller's concern; callers exposing this
    /// flow publicly should respond identically whether or not the account
    /// exists.
    pub async fn issue_password_reset_token(&self, id: &UserId) -> Result<String, AuthError> {
        let record = self
            .store
            .get_user(id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let claims = Claims::new()
            .with_subject(record.id.as_str())
            .with_token_id(Uuid::new_v4())
            .with_claim(PERMISSIONS_CLAIM, "reset-password");

        let token = self.tokens.issue_with(
            &claims,
            &SigningOverrides::new()
                .audience(vec![PASSWORD_RESET_AUDIENCE.to_string()])
                .expires_in(Duration::minutes(ONE_TIME_TOKEN_MINUTES)),
        )?;
        Ok(token)
    }

    /// Reset a password using a token from [`Self::issue_password_reset_token`].
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AuthError> {
        let claims = self.tokens.verify_with(
            token,
            &VerificationOverrides::new().audience(vec![PASSWORD_RESET_AUDIENCE.to_string()]),
        )?;

        let permitted = matches!(
            claims.claim(PERMISSIONS_CLAIM),
            Some(serde_json::Value::String(permission)) if permission == "reset-password"
        );
        if !permitted {
            return Err(AuthError::Token(TokenInvalidError::Malformed(
                "token does not permit a password reset".to_string(),
            )));
        }

        let subject = claims.subject().ok_or_else(|| {
            AuthError::Token(TokenInvalidError::Malformed(
                "reset token has no subject".to_string(),
            ))
        })?;
        let id = UserId::new(subject.to_string())?;

        self.update_password(&id, new_password).await
    }
}
