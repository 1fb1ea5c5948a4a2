use thiserror::Error;

/// Error type for token signing.
#[derive(Debug, Clone, Error)]
pub enum SigningError {
    #[error("Private claim uses reserved name: {0}")]
    ReservedClaim(String),

    #[error("Failed to sign token: {0}")]
    EncodingFailed(String),
}

/// Rejection reasons for token verification.
///
/// Exactly one reason is reported per rejection; claims are never partially
/// returned alongside a failure.
#[derive(Debug, Clone, Error)]
pub enum TokenInvalidError {
    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token issuer mismatch")]
    IssuerMismatch,

    #[error("Token audience mismatch")]
    AudienceMismatch,

    #[error("Token is malformed: {0}")]
    Malformed(String),
}
