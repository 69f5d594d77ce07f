//! Data Transfer Objects for API requests and responses.

pub mod health;
pub mod record;

pub use health::{CheckStatus, HealthChecks, HealthResponse};
pub use record::RecordPayload;
