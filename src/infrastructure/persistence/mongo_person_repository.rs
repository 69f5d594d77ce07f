//! MongoDB implementation of the person repository.

use async_trait::async_trait;
use mongodb::bson::{Bson, doc, oid::ObjectId};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::entities::{Person, UserInput};
use crate::domain::repositories::RecordRepository;
use crate::error::StoreError;

/// How long the driver waits for a usable server before failing an operation.
const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Stored shape of a person. `_id` is left out on insert so the driver assigns it.
#[derive(Debug, Serialize, Deserialize)]
struct PersonDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    name: String,
    email: String,
}

impl PersonDocument {
    fn into_person(self) -> Result<Person, StoreError> {
        let id = self
            .id
            .ok_or_else(|| StoreError::Unexpected("document has no _id".to_string()))?;
        Ok(Person {
            id,
            name: self.name,
            email: self.email,
        })
    }
}

/// MongoDB repository for the persons collection.
pub struct MongoPersonRepository {
    database: Database,
    collection: Collection<PersonDocument>,
}

impl MongoPersonRepository {
    /// Connects to MongoDB and opens `collection` in `database`.
    ///
    /// The driver connects lazily; call [`RecordRepository::ping`] to confirm
    /// the server is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Document`] if the connection string is invalid.
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(uri).await?;
        options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);
        let client = Client::with_options(options)?;

        Ok(Self::new(client.database(database), collection))
    }

    /// Creates a repository over an already opened database.
    pub fn new(database: Database, collection: &str) -> Self {
        let collection = database.collection::<PersonDocument>(collection);
        Self {
            database,
            collection,
        }
    }
}

#[async_trait]
impl RecordRepository for MongoPersonRepository {
    type Key = ObjectId;
    type Record = Person;

    async fn insert(&self, input: &UserInput) -> Result<Person, StoreError> {
        let document = PersonDocument {
            id: None,
            name: input.name.clone(),
            email: input.email.clone(),
        };

        let result = self.collection.insert_one(&document).await?;
        let id = match result.inserted_id {
            Bson::ObjectId(id) => id,
            other => {
                return Err(StoreError::Unexpected(format!(
                    "inserted id is not an object id: {}",
                    other
                )));
            }
        };

        Ok(Person {
            id,
            name: document.name,
            email: document.email,
        })
    }

    async fn find(&self, key: &ObjectId) -> Result<Option<Person>, StoreError> {
        self.collection
            .find_one(doc! { "_id": *key })
            .await?
            .map(PersonDocument::into_person)
            .transpose()
    }

    async fn update(&self, key: &ObjectId, input: &UserInput) -> Result<bool, StoreError> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": *key },
                doc! { "$set": { "name": input.name.as_str(), "email": input.email.as_str() } },
            )
            .await?;

        Ok(result.matched_count > 0)
    }

    async fn delete(&self, key: &ObjectId) -> Result<bool, StoreError> {
        let result = self.collection.delete_one(doc! { "_id": *key }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
