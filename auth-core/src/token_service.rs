use std::sync::Arc;

use crate::jwt::Claims;
use crate::jwt::SigningError;
use crate::jwt::SigningOptions;
use crate::jwt::SigningOverrides;
use crate::jwt::TokenCodec;
use crate::jwt::TokenInvalidError;
use crate::jwt::VerificationOptions;
use crate::jwt::VerificationOverrides;
use crate::keys::KeyManager;

/// Token service facade binding default signing and verification options
/// into the codec.
///
/// Callers supply only a claims payload plus optional per-call overrides;
/// overrides are merged into the bound defaults field by field (override
/// wins) without mutating them. One key manager and codec can back several
/// facades, each with its own issuer/audience policy, without re-deriving
/// keys.
pub struct TokenService {
    keys: Arc<KeyManager>,
    codec: TokenCodec,
    signing_defaults: SigningOptions,
    verification_defaults: VerificationOptions,
}

impl TokenService {
    /// Create a facade over the process key pair with bound default options.
    pub fn new(
        keys: Arc<KeyManager>,
        signing_defaults: SigningOptions,
        verification_defaults: VerificationOptions,
    ) -> Self {
        let codec = TokenCodec::new(keys.clone());
        Self {
            keys,
            codec,
            signing_defaults,
            verification_defaults,
        }
    }

    /// Facade whose verification policy accepts exactly what it signs.
    pub fn with_defaults(keys: Arc<KeyManager>, signing_defaults: SigningOptions) -> Self {
        let verification_defaults = signing_defaults.verification();
        Self::new(keys, signing_defaults, verification_defaults)
    }

    /// Sign claims under the bound default options.
    pub fn issue(&self, claims: &Claims) -> Result<String, SigningError> {
        self.codec.sign(claims, &self.signing_defaults)
    }

    /// Sign claims with per-call overrides merged into the defaults.
    pub fn issue_with(
        &self,
        claims: &Claims,
        overrides: &SigningOverrides,
    ) -> Result<String, SigningError> {
        let options = self.signing_defaults.merge(overrides);
        self.codec.sign(claims, &options)
    }

    /// Verify a token under the bound default options.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenInvalidError> {
        self.codec.verify(token, &self.verification_defaults)
    }

    /// Verify a token with per-call overrides merged into the defaults.
    pub fn verify_with(
        &self,
        token: &str,
        overrides: &VerificationOverrides,
    ) -> Result<Claims, TokenInvalidError> {
        let options = self.verification_defaults.merge(overrides);
        self.codec.verify(token, &options)
    }

    /// Public key export for independent verifiers.
    pub fn public_key_pem(&self) -> &str {
        self.keys.public_key_pem()
    }

    /// The bound default signing options.
    pub fn signing_defaults(&self) -> &SigningOptions {
        &self.signing_defaults
    }

    /// The bound default verification options.
    pub fn verification_defaults(&self) -> &VerificationOptions {
        &self.verification_defaults
    }
}
