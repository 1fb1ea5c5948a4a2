//! Authentication infrastructure library
//!
//! Provides reusable authentication building blocks for services:
//! - Password hashing (Argon2id) with configurable cost tiers
//! - Process-lifetime RSA key pair management with public key export
//! - Token signing and verification (RS256) with bound default options
//!
//! Services construct one [`KeyManager`] and one [`TokenService`] at startup
//! and inject them wherever signing or verification is needed; there is no
//! module-level key or options state.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth_core::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Issuing and Verifying Tokens
//! ```no_run
//! use std::sync::Arc;
//!
//! use auth_core::{Claims, KeyManager, SigningOptions, TokenService};
//! use chrono::Duration;
//!
//! let keys = Arc::new(KeyManager::generate_default().unwrap());
//! let tokens = TokenService::with_defaults(
//!     keys,
//!     SigningOptions::new(
//!         "my-service",
//!         vec!["my-service".to_string()],
//!         Duration::minutes(10),
//!     ),
//! );
//!
//! let claims = Claims::new().with_subject("user123").with_claim("role", "admin");
//! let token = tokens.issue(&claims).unwrap();
//! let verified = tokens.verify(&token).unwrap();
//! assert_eq!(verified.subject(), Some("user123"));
//!
//! // Hand the public half to services that verify tokens on their own
//! println!("{}", tokens.public_key_pem());
//! ```

pub mod jwt;
pub mod keys;
pub mod password;
pub mod token_service;

// Re-export commonly used items
pub use jwt::Algorithm;
pub use jwt::Claims;
pub use jwt::SigningError;
pub use jwt::SigningOptions;
pub use jwt::SigningOverrides;
pub use jwt::TokenCodec;
pub use jwt::TokenInvalidError;
pub use jwt::VerificationOptions;
pub use jwt::VerificationOverrides;
pub use keys::KeyError;
pub use keys::KeyManager;
pub use password::HashingParams;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token_service::TokenService;
