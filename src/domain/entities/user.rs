//! User entities for both store families.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::domain::keys::{RecordKey, StoredRecord};

/// Client-supplied fields of a user record.
///
/// Identifiers are never client-supplied; the store assigns them on insert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserInput {
    pub name: String,
    pub email: String,
}

impl UserInput {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// A user stored in the relational table, keyed by an auto-increment integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl StoredRecord for User {
    type Key = i64;

    fn key(&self) -> &i64 {
        &self.id
    }

    fn assemble(key: i64, input: UserInput) -> Self {
        Self {
            id: key,
            name: input.name,
            email: input.email,
        }
    }
}

/// A user stored in the document collection.
///
/// The object id is rendered as a 24-character hex string in JSON.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    #[serde_as(as = "DisplayFromStr")]
    pub id: ObjectId,
    pub name: String,
    pub email: String,
}

impl StoredRecord for Person {
    type Key = ObjectId;

    fn key(&self) -> &ObjectId {
        &self.id
    }

    fn assemble(key: ObjectId, input: UserInput) -> Self {
        Self {
            id: key,
            name: input.name,
            email: input.email,
        }
    }
}

/// External string form of a record's identifier, used as its cache key.
pub fn cache_key<R: StoredRecord>(record: &R) -> String {
    record.key().cache_key()
}
