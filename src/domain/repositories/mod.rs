//! Repository trait definitions for the domain layer.
//!
//! Both store families are reached through [`RecordRepository`]; concrete
//! implementations live in `crate::infrastructure::persistence`.
//!
//! # Testing
//!
//! Mock implementations are auto-generated via `mockall`. See integration tests
//! in `tests/repository_*.rs` for the real stores.

pub mod record_repository;

pub use record_repository::RecordRepository;

#[cfg(test)]
pub use record_repository::MockRecordRepository;
