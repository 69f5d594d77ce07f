//! Core domain entities.
//!
//! - [`User`] - Record of the relational store (integer identifier)
//! - [`Person`] - Record of the document store (object identifier)
//! - [`UserInput`] - Client-supplied fields used for create and update

pub mod user;

pub use user::{Person, User, UserInput, cache_key};
