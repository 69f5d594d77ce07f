//! DTO for create and update request bodies.

use serde::Deserialize;
use serde_with::{DefaultOnNull, serde_as};

use crate::domain::entities::UserInput;

/// Request body for `POST` and `PUT` on `/users` and `/persons`.
///
/// Missing or `null` fields decode as empty strings and are then rejected by
/// validation. An `id` field, if present, is ignored.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct RecordPayload {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub name: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub email: String,
}

impl From<RecordPayload> for UserInput {
    fn from(payload: RecordPayload) -> Self {
        UserInput::new(payload.name, payload.email)
    }
}
