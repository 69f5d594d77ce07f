//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation and cache refresh. Services consume repository traits and provide
//! a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::RecordService`] - Create, read, update and delete of user
//!   records, generic over the backing store, with read-through caching
//! - [`services::UserService`] / [`services::PersonService`] - The two
//!   instantiations wired into the HTTP layer

pub mod services;
