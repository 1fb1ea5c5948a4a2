pub mod errors;
pub mod models;
pub mod ports;
pub mod service;

pub use errors::AuthError;
pub use errors::StoreError;
pub use models::AuthenticatedUser;
pub use models::Credentials;
pub use models::EmailAddress;
pub use models::UserId;
pub use models::UserRecord;
pub use ports::UserStore;
pub use service::AuthService;
