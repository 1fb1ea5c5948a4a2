use thiserror::Error;

/// Error type for key pair management.
#[derive(Debug, Clone, Error)]
pub enum KeyError {
    #[error("Key generation failed: {0}")]
    GenerationFailed(String),

    #[error("Modulus of {actual} bits is below the {min}-bit minimum")]
    WeakModulus { min: usize, actual: usize },

    #[error("Invalid key material: {0}")]
    InvalidKey(String),
}
