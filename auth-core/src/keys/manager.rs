use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use rand::rngs::OsRng;
use rsa::pkcs8::EncodePrivateKey;
use rsa::pkcs8::EncodePublicKey;
use rsa::pkcs8::LineEnding;
use rsa::RsaPrivateKey;
use rsa::RsaPublicKey;

use super::errors::KeyError;

/// Smallest modulus length accepted for a signing key pair.
pub const MIN_MODULUS_BITS: usize = 2048;

/// Modulus length used when callers do not configure one.
pub const DEFAULT_MODULUS_BITS: usize = 2048;

/// Manager for the process-wide RSA key pair used to sign and verify tokens.
///
/// One key pair is generated at service start and lives for the process. The
/// private half stays inside this type and the token codec's signing path;
/// only the public half is exported, as SPKI PEM, for external verifiers.
#[derive(Clone)]
pub struct KeyManager {
    /// Private key for signing tokens. Crate-visible only.
    encoding_key: EncodingKey,
    /// Public key for verifying tokens.
    decoding_key: DecodingKey,
    /// SPKI PEM encoding of the public key, safe to hand out.
    public_key_pem: String,
}

impl std::fmt::Debug for KeyManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key material is deliberately not printed
        f.debug_struct("KeyManager").finish_non_exhaustive()
    }
}

impl KeyManager {
    /// Generate a fresh RSA key pair with the given modulus length.
    ///
    /// # Arguments
    /// * `bits` - Modulus length; must be at least [`MIN_MODULUS_BITS`]
    ///
    /// # Errors
    /// * `WeakModulus` - Requested modulus is below the accepted minimum
    /// * `GenerationFailed` - The RSA primitive failed
    pub fn generate(bits: usize) -> Result<Self, KeyError> {
        if bits < MIN_MODULUS_BITS {
            return Err(KeyError::WeakModulus {
                min: MIN_MODULUS_BITS,
                actual: bits,
            });
        }

        let mut rng = OsRng;
        let private_key = RsaPrivateKey::new(&mut rng, bits)
            .map_err(|e| KeyError::GenerationFailed(e.to_string()))?;
        let public_key = RsaPublicKey::from(&private_key);

        let private_pem = private_key
            .to_pkcs8_pem(LineEnding::LF)
            .map_err(|e| KeyError::GenerationFailed(e.to_string()))?;
        let public_pem = public_key
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| KeyError::GenerationFailed(e.to_string()))?;

        Self::from_pem(private_pem.as_str(), &public_pem)
    }

    /// Generate a key pair with the default modulus length.
    pub fn generate_default() -> Result<Self, KeyError> {
        Self::generate(DEFAULT_MODULUS_BITS)
    }

    /// Build a key manager from pre-provisioned PEM strings.
    ///
    /// # Arguments
    /// * `private_key_pem` - PKCS#8 PEM-encoded private key
    /// * `public_key_pem` - SPKI PEM-encoded public key
    ///
    /// # Errors
    /// * `InvalidKey` - Either PEM is not a usable RSA key
    pub fn from_pem(private_key_pem: &str, public_key_pem: &str) -> Result<Self, KeyError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes())
            .map_err(|e| KeyError::InvalidKey(format!("Invalid private key: {}", e)))?;

        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
            .map_err(|e| KeyError::InvalidKey(format!("Invalid public key: {}", e)))?;

        Ok(Self {
            encoding_key,
            decoding_key,
            public_key_pem: public_key_pem.to_owned(),
        })
    }

    /// SPKI PEM encoding of the public key.
    ///
    /// This is the half other services use to verify tokens independently,
    /// without contacting the issuing service for each verification.
    pub fn public_key_pem(&self) -> &str {
        &self.public_key_pem
    }

    /// Private key handle for the signing path.
    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    /// Public key handle for the verification path.
    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}
