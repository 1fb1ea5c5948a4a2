pub mod claims;
pub mod codec;
pub mod errors;
pub mod options;

pub use claims::Claims;
pub use codec::TokenCodec;
pub use errors::SigningError;
pub use errors::TokenInvalidError;
pub use options::SigningOptions;
pub use options::SigningOverrides;
pub use options::VerificationOptions;
pub use options::VerificationOverrides;

// Callers configure algorithms through the options types without depending
// on jsonwebtoken directly.
pub use jsonwebtoken::Algorithm;
