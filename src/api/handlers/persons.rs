//! Handlers for the document `/persons` resource.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};

use super::json_response;
use crate::api::dto::RecordPayload;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a person in the document store.
///
/// # Endpoint
///
/// `POST /persons`
///
/// # Response
///
/// 201 Created with `{"id": "<24 hex chars>", "name": ..., "email": ...}`.
///
/// # Errors
///
/// - 400 with `{"Error": "<message>"}` if name or email is invalid
/// - 500 with the store error text if the insert fails
pub async fn create_person_handler(
    State(state): State<AppState>,
    Json(payload): Json<RecordPayload>,
) -> Result<Response, AppError> {
    let created = state.person_service.create(payload.into()).await?;
    tracing::info!(id = %created.record.id, "Person created");
    Ok(json_response(StatusCode::CREATED, created.body))
}

/// Returns a person, from the cache when present.
///
/// # Endpoint
///
/// `GET /persons/{id}`
///
/// # Errors
///
/// - 400 `invalid id format` if the id is not an object id (checked after a cache miss)
/// - 404 `user not found` if no document carries the id
/// - 500 with the store error text on store failure
pub async fn get_person_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let fetched = state.person_service.fetch(&id).await?;
    tracing::debug!(id = %id, source = ?fetched.source, "Person fetched");
    Ok(json_response(StatusCode::OK, fetched.body))
}

/// Replaces name and email of a person and refreshes its cache entry.
///
/// # Endpoint
///
/// `PUT /persons/{id}`
///
/// # Errors
///
/// - 400 with `{"Error": "<message>"}` if name or email is invalid
/// - 400 `invalid id format` if the id is not an object id
/// - 404 `user not found` if no document matched
pub async fn update_person_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<RecordPayload>,
) -> Result<Response, AppError> {
    let body = state.person_service.update(&id, payload.into()).await?;
    Ok(json_response(StatusCode::OK, body))
}

/// Deletes a person and evicts its cache entry.
///
/// # Endpoint
///
/// `DELETE /persons/{id}`
///
/// A malformed id matches nothing and is reported as 404.
pub async fn delete_person_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<(StatusCode, &'static str), AppError> {
    state.person_service.delete(&id).await?;
    tracing::info!(id = %id, "Person deleted");
    Ok((StatusCode::OK, "user Deleted!"))
}
