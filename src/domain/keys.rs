//! Record identifiers and the traits tying them to stored records.
//!
//! The two store families assign identifiers differently: the relational table
//! hands out auto-increment integers, the document collection generates 12-byte
//! object ids. Both are parsed from the request path and rendered back into the
//! same external string form, which doubles as the cache key.

use std::fmt;

use mongodb::bson::oid::ObjectId;
use serde::Serialize;
use thiserror::Error;

use crate::domain::entities::UserInput;

/// Why a raw path identifier could not be turned into a store key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum KeyError {
    /// The text can never name a stored record. Reported as not found.
    #[error("identifier cannot match any record")]
    Unmatchable,
    /// The text is not a well-formed identifier for this store.
    #[error("invalid id format")]
    Malformed,
}

/// An identifier assigned by a backing store.
pub trait RecordKey: fmt::Display + fmt::Debug + Clone + PartialEq + Send + Sync + 'static {
    /// Parses the external string form taken from a request path.
    fn parse(raw: &str) -> Result<Self, KeyError>;

    /// Cache key for the record carrying this identifier.
    fn cache_key(&self) -> String {
        self.to_string()
    }
}

impl RecordKey for i64 {
    fn parse(raw: &str) -> Result<Self, KeyError> {
        raw.parse().map_err(|_| KeyError::Unmatchable)
    }
}

impl RecordKey for ObjectId {
    fn parse(raw: &str) -> Result<Self, KeyError> {
        ObjectId::parse_str(raw).map_err(|_| KeyError::Malformed)
    }
}

/// A record as persisted by one store family.
pub trait StoredRecord: Serialize + Clone + fmt::Debug + Send + Sync + 'static {
    type Key: RecordKey;

    fn key(&self) -> &Self::Key;

    /// Builds the record from a store-assigned key and client-supplied fields.
    fn assemble(key: Self::Key, input: UserInput) -> Self;
}
