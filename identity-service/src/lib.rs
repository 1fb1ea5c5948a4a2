//! Identity service
//!
//! Credential verification and account lifecycle on top of the `auth-core`
//! infrastructure: user records live behind the [`domain::user::ports::UserStore`]
//! port, passwords are verified against stored Argon2id hashes, and access
//! tokens are issued and checked through an injected
//! [`auth_core::TokenService`].

pub mod config;
pub mod domain;
pub mod outbound;

pub use domain::user;
pub use outbound::repositories;
