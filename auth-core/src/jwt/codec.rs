use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::SigningError;
use super::errors::TokenInvalidError;
use super::options::SigningOptions;
use super::options::VerificationOptions;
use crate::keys::KeyManager;

/// Token codec: signs a claims payload into a compact token string and
/// verifies a token string back into claims.
///
/// Signing uses the key manager's private half; verification uses only the
/// public half. Expiry, issuer, audience, and the algorithm allow-list are
/// all enforced at verification time against wall-clock `now`.
pub struct TokenCodec {
    keys: Arc<KeyManager>,
}

impl TokenCodec {
    /// Create a codec over the process key pair.
    pub fn new(keys: Arc<KeyManager>) -> Self {
        Self { keys }
    }

    /// Sign claims into a compact token string.
    ///
    /// Stamps `iat` with the current time and derives `exp` from
    /// `options.expires_in`; issuer and audience are taken from the options.
    /// Caller-set subject, token id, and private claims pass through
    /// untouched.
    ///
    /// # Errors
    /// * `ReservedClaim` - A private claim collides with a reserved name
    /// * `EncodingFailed` - The signing primitive failed
    pub fn sign(&self, claims: &Claims, options: &SigningOptions) -> Result<String, SigningError> {
        if let Some(name) = claims.reserved_collision() {
            return Err(SigningError::ReservedClaim(name.to_string()));
        }

        let now = Utc::now();
        let mut stamped = claims.clone();
        stamped.iss = Some(options.issuer.clone());
        stamped.aud = Some(options.audience.clone());
        stamped.iat = Some(now.timestamp());
        stamped.exp = Some((now + options.expires_in).timestamp());

        let header = Header::new(options.algorithm);
        encode(&header, &stamped, self.keys.encoding_key())
            .map_err(|e| SigningError::EncodingFailed(e.to_string()))
    }

    /// Verify a compact token string and return its claims.
    ///
    /// Rejects when the signature is invalid, the header algorithm is not in
    /// the accepted set, the issuer mismatches, the audience sets do not
    /// intersect, or the token is expired. Claims are only returned when
    /// every check passes.
    pub fn verify(
        &self,
        token: &str,
        options: &VerificationOptions,
    ) -> Result<Claims, TokenInvalidError> {
        let mut validation = Validation::new(
            options.algorithms.first().copied().unwrap_or(Algorithm::RS256),
        );
        validation.algorithms = options.algorithms.clone();
        validation.set_issuer(&[&options.issuer]);
        validation.set_audience(&options.audience);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);
        // Expiry is strict: current time at or past `exp` rejects
        validation.leeway = 0;

        decode::<Claims>(token, self.keys.decoding_key(), &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenInvalidError::BadSignature
                }
                ErrorKind::ExpiredSignature => TokenInvalidError::Expired,
                ErrorKind::InvalidIssuer => TokenInvalidError::IssuerMismatch,
                ErrorKind::InvalidAudience => TokenInvalidError::AudienceMismatch,
                ErrorKind::MissingRequiredClaim(claim) => match claim.as_str() {
                    "iss" => TokenInvalidError::IssuerMismatch,
                    "aud" => TokenInvalidError::AudienceMismatch,
                    _ => TokenInvalidError::Malformed(format!(
                        "missing required claim: {}",
                        claim
                    )),
                },
                _ => TokenInvalidError::Malformed(e.to_string()),
            })
    }
}
