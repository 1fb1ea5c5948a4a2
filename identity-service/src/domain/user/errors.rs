use auth_core::PasswordError;
use auth_core::SigningError;
use auth_core::TokenInvalidError;
use thiserror::Error;

/// Error for UserId validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("User ID too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("User ID too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("User ID contains invalid characters (only alphanumeric, '.', '_', '-', '@' allowed)")]
    InvalidCharacters,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for user storage operations
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("User already exists: {0}")]
    AlreadyExists(String),

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Top-level error for credential and account operations.
///
/// `UserNotFound` and `WrongPassword` stay distinct variants so callers can
/// map status codes, but both render the same opaque message: a response
/// must never disclose whether the identifier or the password was wrong.
/// The distinction is only ever logged internally.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    UserNotFound,

    #[error("Invalid credentials")]
    WrongPassword,

    #[error("Account already exists")]
    AlreadyExists,

    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    // Token errors keep their rejection reason
    #[error("Invalid token: {0}")]
    Token(#[from] TokenInvalidError),

    // Infrastructure errors (500-class); detail is for logs, not responses
    #[error("Password hashing failed: {0}")]
    Password(#[from] PasswordError),

    #[error("Token signing failed: {0}")]
    Signing(#[from] SigningError),

    #[error("Storage failure: {0}")]
    Storage(String),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => AuthError::UserNotFound,
            StoreError::AlreadyExists(_) => AuthError::AlreadyExists,
            StoreError::Backend(message) => AuthError::Storage(message),
        }
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        AuthError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_failures_render_identically() {
        // Neither message may reveal which part of the credentials was wrong
        assert_eq!(
            AuthError::UserNotFound.to_string(),
            AuthError::WrongPassword.to_string()
        );
    }

    #[test]
    fn test_store_error_mapping() {
        assert!(matches!(
            AuthError::from(StoreError::NotFound("jaime".to_string())),
            AuthError::UserNotFound
        ));
        assert!(matches!(
            AuthError::from(StoreError::AlreadyExists("jaime".to_string())),
            AuthError::AlreadyExists
        ));
        assert!(matches!(
            AuthError::from(StoreError::Backend("connection reset".to_string())),
            AuthError::Storage(_)
        ));
    }
}
