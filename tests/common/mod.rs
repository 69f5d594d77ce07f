#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Router, routing::get};
use axum_test::TestServer;
use mongodb::bson::oid::ObjectId;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use user_cache_service::api::handlers::health_handler;
use user_cache_service::api::routes::{person_routes, user_routes};
use user_cache_service::application::services::{PersonService, UserService};
use user_cache_service::domain::entities::{Person, User, UserInput};
use user_cache_service::domain::keys::{RecordKey, StoredRecord};
use user_cache_service::domain::repositories::RecordRepository;
use user_cache_service::error::StoreError;
use user_cache_service::infrastructure::cache::MemoryCache;
use user_cache_service::state::AppState;

pub const CACHE_TTL: Duration = Duration::from_secs(600);
pub const STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Store double keeping records in a map keyed by their external id.
///
/// `set_failing(true)` makes every call return a store error, which stands in
/// for a lost database connection.
pub struct InMemoryRepository<R: StoredRecord> {
    records: Mutex<HashMap<String, R>>,
    next_key: Box<dyn Fn() -> R::Key + Send + Sync>,
    failing: AtomicBool,
}

impl<R: StoredRecord> InMemoryRepository<R> {
    pub fn new(next_key: impl Fn() -> R::Key + Send + Sync + 'static) -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            next_key: Box::new(next_key),
            failing: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn get(&self, key: &R::Key) -> Option<R> {
        self.records.lock().unwrap().get(&key.cache_key()).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StoreError::Unexpected("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

impl InMemoryRepository<User> {
    pub fn users() -> Self {
        let counter = AtomicI64::new(1);
        Self::new(move || counter.fetch_add(1, Ordering::SeqCst))
    }
}

impl InMemoryRepository<Person> {
    pub fn persons() -> Self {
        Self::new(ObjectId::new)
    }
}

#[async_trait]
impl<R: StoredRecord> RecordRepository for InMemoryRepository<R> {
    type Key = R::Key;
    type Record = R;

    async fn insert(&self, input: &UserInput) -> Result<R, StoreError> {
        self.check()?;
        let record = R::assemble((self.next_key)(), input.clone());
        self.records
            .lock()
            .unwrap()
            .insert(record.key().cache_key(), record.clone());
        Ok(record)
    }

    async fn find(&self, key: &R::Key) -> Result<Option<R>, StoreError> {
        self.check()?;
        Ok(self.get(key))
    }

    async fn update(&self, key: &R::Key, input: &UserInput) -> Result<bool, StoreError> {
        self.check()?;
        let mut records = self.records.lock().unwrap();
        match records.get_mut(&key.cache_key()) {
            Some(record) => {
                *record = R::assemble(key.clone(), input.clone());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, key: &R::Key) -> Result<bool, StoreError> {
        self.check()?;
        Ok(self
            .records
            .lock()
            .unwrap()
            .remove(&key.cache_key())
            .is_some())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check()
    }
}

/// Handles kept by a test to inspect or break the backing services.
pub struct TestContext {
    pub server: TestServer,
    pub cache: Arc<MemoryCache>,
    pub users: Arc<InMemoryRepository<User>>,
    pub persons: Arc<InMemoryRepository<Person>>,
}

pub fn create_test_state() -> (
    AppState,
    Arc<MemoryCache>,
    Arc<InMemoryRepository<User>>,
    Arc<InMemoryRepository<Person>>,
) {
    let cache = Arc::new(MemoryCache::new());
    let users = Arc::new(InMemoryRepository::users());
    let persons = Arc::new(InMemoryRepository::persons());

    let user_service = Arc::new(UserService::new(
        users.clone(),
        cache.clone(),
        CACHE_TTL,
        STORE_TIMEOUT,
    ));
    let person_service = Arc::new(PersonService::new(
        persons.clone(),
        cache.clone(),
        CACHE_TTL,
        STORE_TIMEOUT,
    ));

    let state = AppState::new(user_service, person_service, cache.clone());
    (state, cache, users, persons)
}

pub fn test_app(state: AppState) -> Router {
    Router::new()
        .merge(user_routes())
        .merge(person_routes())
        .route("/health", get(health_handler))
        .with_state(state)
}

pub fn setup() -> TestContext {
    let (state, cache, users, persons) = create_test_state();
    let server = TestServer::new(test_app(state)).unwrap();

    TestContext {
        server,
        cache,
        users,
        persons,
    }
}
