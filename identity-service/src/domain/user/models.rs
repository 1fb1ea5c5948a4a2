use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::errors::EmailError;
use crate::domain::user::errors::UserIdError;

/// User record as held by the storage collaborator.
///
/// New accounts are created without a password hash and cannot authenticate
/// by password until one is established through the update-hash operation.
/// The record never holds a plaintext password.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: UserId,
    pub email: EmailAddress,
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Create a fresh record with no password hash set.
    pub fn new(id: UserId, email: EmailAddress) -> Self {
        Self {
            id,
            email,
            password_hash: None,
            created_at: Utc::now(),
        }
    }
}

/// A user record with the password hash stripped, as returned to callers
/// after successful credential verification.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub email: EmailAddress,
    pub created_at: DateTime<Utc>,
}

impl From<UserRecord> for AuthenticatedUser {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            email: record.email,
            created_at: record.created_at,
        }
    }
}

/// User unique identifier type
///
/// Ensures the identifier is 3-64 characters of alphanumerics plus
/// `.`, `_`, `-`, and `@`, so email-style identifiers are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 64;

    /// Create a new valid user identifier.
    ///
    /// # Errors
    /// * `TooShort` / `TooLong` - Length outside 3-64 characters
    /// * `InvalidCharacters` - Contains characters outside the allowed set
    pub fn new(id: String) -> Result<Self, UserIdError> {
        let length = id.len();
        if length < Self::MIN_LENGTH {
            return Err(UserIdError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        if length > Self::MAX_LENGTH {
            return Err(UserIdError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        if !id
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '.' | '_' | '-' | '@'))
        {
            return Err(UserIdError::InvalidCharacters);
        }
        Ok(Self(id))
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using an RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get the email as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Ephemeral credential pair supplied by a login attempt.
///
/// Exists only for the duration of a verification call; never persisted.
/// The password is redacted from debug output so the pair can never reach a
/// log line in plaintext.
#[derive(Clone)]
pub struct Credentials {
    pub id: UserId,
    pub password: String,
}

impl Credentials {
    pub fn new(id: UserId, password: impl Into<String>) -> Self {
        Self {
            id,
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("id", &self.id)
            .field("password", &"<redacted>")
            .finish()
    }
}
