//! Repository trait shared by both user store families.

use async_trait::async_trait;

use crate::domain::entities::UserInput;
use crate::domain::keys::{RecordKey, StoredRecord};
use crate::error::StoreError;

/// Capability interface over one backing store of user records.
///
/// The relational and document stores differ only in how they assign and
/// encode identifiers, so both implement this trait and share one
/// orchestration layer ([`crate::application::services::RecordService`]).
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL table
/// - [`crate::infrastructure::persistence::MongoPersonRepository`] - MongoDB collection
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock(type Key = i64; type Record = crate::domain::entities::User;))]
#[async_trait]
pub trait RecordRepository: Send + Sync {
    type Key: RecordKey;
    type Record: StoredRecord<Key = Self::Key>;

    /// Inserts a new record; the store assigns its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on any store failure.
    async fn insert(&self, input: &UserInput) -> Result<Self::Record, StoreError>;

    /// Finds a record by identifier.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))` if found
    /// - `Ok(None)` if no record carries this identifier
    async fn find(&self, key: &Self::Key) -> Result<Option<Self::Record>, StoreError>;

    /// Overwrites name and email of an existing record.
    ///
    /// Returns `Ok(false)` when no record matched the identifier.
    async fn update(&self, key: &Self::Key, input: &UserInput) -> Result<bool, StoreError>;

    /// Permanently removes a record.
    ///
    /// Returns `Ok(false)` when no record matched the identifier.
    async fn delete(&self, key: &Self::Key) -> Result<bool, StoreError>;

    /// Round-trips to the store to confirm it is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
