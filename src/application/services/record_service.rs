//! Read-through / write-through orchestration over one record store.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use mongodb::bson::oid::ObjectId;
use tracing::{debug, warn};

use crate::domain::entities::{Person, User, UserInput, cache_key};
use crate::domain::keys::{KeyError, RecordKey, StoredRecord};
use crate::domain::repositories::RecordRepository;
use crate::domain::validation::validate_user;
use crate::error::{AppError, StoreError};
use crate::infrastructure::cache::{CacheError, CacheResult, CacheService};

/// Record service over the relational `users` table.
pub type UserService = RecordService<dyn RecordRepository<Key = i64, Record = User>>;

/// Record service over the document `persons` collection.
pub type PersonService = RecordService<dyn RecordRepository<Key = ObjectId, Record = Person>>;

/// A record just written to the store, with the JSON cached for it.
#[derive(Debug, Clone)]
pub struct Created<T> {
    pub record: T,
    pub body: String,
}

/// Where a read was answered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadSource {
    Cache,
    Store,
}

/// JSON body of a read together with its source.
#[derive(Debug, Clone)]
pub struct Fetched {
    pub body: String,
    pub source: ReadSource,
}

/// Service coordinating validation, the backing store and the cache.
///
/// The store is the source of truth. The cache is advisory: reads consult it
/// first and fill it on a miss, successful writes overwrite or evict the entry.
/// Every cache failure is logged and discarded. Every store and cache call is
/// bounded by the same timeout.
pub struct RecordService<R: RecordRepository + ?Sized> {
    repository: Arc<R>,
    cache: Arc<dyn CacheService>,
    cache_ttl: Duration,
    timeout: Duration,
}

impl<R: RecordRepository + ?Sized> RecordService<R> {
    /// Creates a new record service.
    ///
    /// - `cache_ttl` - expiry applied to every cache write
    /// - `timeout` - upper bound for each store and cache call
    pub fn new(
        repository: Arc<R>,
        cache: Arc<dyn CacheService>,
        cache_ttl: Duration,
        timeout: Duration,
    ) -> Self {
        Self {
            repository,
            cache,
            cache_ttl,
            timeout,
        }
    }

    /// Validates and inserts a new record, then caches its JSON.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] without touching the store if the input
    /// is rejected, and [`AppError::Store`] if the insert fails.
    pub async fn create(&self, input: UserInput) -> Result<Created<R::Record>, AppError> {
        validate_user(&input)?;

        let record = self.store(self.repository.insert(&input)).await?;
        let body = serde_json::to_string(&record)?;

        self.refresh_cache(&cache_key(&record), &body).await;

        Ok(Created { record, body })
    }

    /// Returns the JSON of the record identified by `raw_id`.
    ///
    /// A cache hit is returned verbatim without consulting the store. On a miss
    /// the record is read from the store and cached.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidId`] if `raw_id` is not a well-formed identifier
    /// - [`AppError::NotFound`] if no record carries the identifier
    /// - [`AppError::Store`] on store failure
    pub async fn fetch(&self, raw_id: &str) -> Result<Fetched, AppError> {
        if let Some(body) = self.cached(raw_id).await {
            debug!(id = raw_id, "Cache hit");
            return Ok(Fetched {
                body,
                source: ReadSource::Cache,
            });
        }
        debug!(id = raw_id, "Cache miss, querying store");

        let key = R::Key::parse(raw_id).map_err(AppError::from_key_error)?;
        let record = self
            .store(self.repository.find(&key))
            .await?
            .ok_or(AppError::NotFound)?;
        let body = serde_json::to_string(&record)?;

        self.refresh_cache(&key.cache_key(), &body).await;

        Ok(Fetched {
            body,
            source: ReadSource::Store,
        })
    }

    /// Validates the new fields, updates the stored record and overwrites its
    /// cache entry with a fresh expiry.
    ///
    /// The identifier always comes from `raw_id`.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if the input is rejected
    /// - [`AppError::InvalidId`] if `raw_id` is not a well-formed identifier
    /// - [`AppError::NotFound`] if no record matched
    /// - [`AppError::Store`] on store failure
    pub async fn update(&self, raw_id: &str, input: UserInput) -> Result<String, AppError> {
        validate_user(&input)?;

        let key = R::Key::parse(raw_id).map_err(AppError::from_key_error)?;
        if !self.store(self.repository.update(&key, &input)).await? {
            return Err(AppError::NotFound);
        }

        let record = R::Record::assemble(key, input);
        let body = serde_json::to_string(&record)?;

        self.refresh_cache(&cache_key(&record), &body).await;

        Ok(body)
    }

    /// Deletes the stored record and evicts its cache entry.
    ///
    /// An identifier that cannot be parsed is reported as not found.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if no record matched
    /// - [`AppError::Store`] on store failure
    pub async fn delete(&self, raw_id: &str) -> Result<(), AppError> {
        let key = R::Key::parse(raw_id).map_err(|_: KeyError| AppError::NotFound)?;
        if !self.store(self.repository.delete(&key)).await? {
            return Err(AppError::NotFound);
        }

        let cache_key = key.cache_key();
        let outcome = self.bounded_cache(self.cache.delete(&cache_key)).await;
        discard(outcome, "delete", &cache_key);

        Ok(())
    }

    /// Checks that the backing store answers within the timeout.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.store(self.repository.ping()).await
    }

    async fn store<T>(
        &self,
        operation: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        tokio::time::timeout(self.timeout, operation)
            .await
            .map_err(|_| StoreError::Timeout)?
    }

    async fn bounded_cache<T>(
        &self,
        operation: impl Future<Output = CacheResult<T>>,
    ) -> CacheResult<T> {
        tokio::time::timeout(self.timeout, operation)
            .await
            .map_err(|_| CacheError::Timeout)?
    }

    /// Cache lookup where any failure counts as a miss.
    async fn cached(&self, key: &str) -> Option<String> {
        let outcome = self.bounded_cache(self.cache.get(key)).await;
        discard(outcome, "get", key).flatten()
    }

    async fn refresh_cache(&self, key: &str, body: &str) {
        let outcome = self
            .bounded_cache(self.cache.set(key, body, self.cache_ttl))
            .await;
        discard(outcome, "set", key);
    }
}

/// Logs a failed cache call and drops the error.
fn discard<T>(outcome: CacheResult<T>, operation: &str, key: &str) -> Option<T> {
    match outcome {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(error = %e, operation, key, "Cache operation failed, continuing without cache");
            None
        }
    }
}
