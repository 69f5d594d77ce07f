//! Store implementations of [`crate::domain::repositories::RecordRepository`].
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - PostgreSQL `users` table, integer identifiers
//! - [`MongoPersonRepository`] - MongoDB collection, object identifiers

pub mod mongo_person_repository;
pub mod pg_user_repository;

pub use mongo_person_repository::MongoPersonRepository;
pub use pg_user_repository::PgUserRepository;
