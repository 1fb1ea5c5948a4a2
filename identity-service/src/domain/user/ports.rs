use async_trait::async_trait;

use crate::domain::user::errors::StoreError;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserRecord;

/// Persistence port for user records.
///
/// Implementations must make each single-record operation atomic: two
/// concurrent `update_hash` calls for the same id may interleave in either
/// order, but the surviving record always equals one of the two writes,
/// never a corrupted merge.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Retrieve a user record by identifier.
    ///
    /// # Returns
    /// Optional record (None if not found)
    ///
    /// # Errors
    /// * `Backend` - Storage operation failed
    async fn get_user(&self, id: &UserId) -> Result<Option<UserRecord>, StoreError>;

    /// Persist a new user record.
    ///
    /// # Errors
    /// * `AlreadyExists` - A record with this id or email is already stored
    /// * `Backend` - Storage operation failed
    async fn insert_user(&self, record: UserRecord) -> Result<(), StoreError>;

    /// Replace the password hash of an existing record.
    ///
    /// This is deliberately an update, not a set: records are created
    /// without a hash and gain one later.
    ///
    /// # Errors
    /// * `NotFound` - No record with this id
    /// * `Backend` - Storage operation failed
    async fn update_hash(&self, id: &UserId, new_hash: String) -> Result<(), StoreError>;
}
