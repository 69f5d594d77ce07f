//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::{PersonService, UserService};
use crate::infrastructure::cache::CacheService;

/// Process-wide handles, built once at startup and cloned per request.
///
/// The underlying store and cache clients pool their own connections, so
/// handlers share them without extra locking.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub person_service: Arc<PersonService>,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    pub fn new(
        user_service: Arc<UserService>,
        person_service: Arc<PersonService>,
        cache: Arc<dyn CacheService>,
    ) -> Self {
        Self {
            user_service,
            person_service,
            cache,
        }
    }
}
