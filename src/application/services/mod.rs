//! Business logic services for the application layer.

pub mod record_service;

pub use record_service::{Created, Fetched, PersonService, ReadSource, RecordService, UserService};
