//! Domain layer containing business entities and rules.
//!
//! # Architecture
//!
//! - [`entities`] - User records for both store families
//! - [`keys`] - Identifier parsing and the record/key contract
//! - [`repositories`] - Data access trait definitions
//! - [`validation`] - Name and email format rules
//!
//! The domain layer has no knowledge of HTTP or of the cache. Repository traits
//! define contracts implemented by the infrastructure layer.

pub mod entities;
pub mod keys;
pub mod repositories;
pub mod validation;
