//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to one resource family. Handlers only
//! translate HTTP to service calls; orchestration lives in
//! [`crate::application::services::RecordService`].

pub mod health;
pub mod persons;
pub mod users;

pub use health::health_handler;
pub use persons::{
    create_person_handler, delete_person_handler, get_person_handler, update_person_handler,
};
pub use users::{create_user_handler, delete_user_handler, get_user_handler, update_user_handler};

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

/// Sends already serialized JSON as-is, so cached bytes reach the client unchanged.
pub(crate) fn json_response(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}
