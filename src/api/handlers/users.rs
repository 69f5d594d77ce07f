//! Handlers for the relational `/users` resource.

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

/// Creates a user in the relational store.
///
/// # Endpoint
///
/// `POST /users`
///
/// # Request Body
///
/// ```json
/// { "name": "Akash", "email": "akash@gmail.com" }
/// ```
///
/// # Response
///
/// 201 Created with `{"id": 1, "name": "Akash", "email": "akash@gmail.com"}`.
///
/// # Errors
///
/// - 400 with `{"Error": "<message>"}` if name or email is invalid
/// - 500 with the store error text if the insert fails
pub async fn create_user_handler(
    State(state): State<AppState>,
    Json(payload): Json<RecordPayload>,
) -> Result<Response, AppError> {
    let created = state.user_service.create(payload.into()).await?;
    tracing::info!(id = created.record.id, "User created");
    Ok(json_response(StatusCode::CREATED, created.body))
}

/// Returns a user, from the cache when present.
///
/// # Endpoint
///
/// `GET /users/{id}`
///
/// # Errors
///
/// - 404 `user not found` if no row carries the id
pub async fn get_user_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let fetched = state.user_service.fetch(&id).await?;
    tracing::debug!(id = %id, source = ?fetched.source, "User fetched");
    Ok(json_response(StatusCode::OK, fetched.body))
}

/// Replaces name and email of a user and refreshes its cache entry.
///
/// # Endpoint
///
/// `PUT /users/{id}`
///
/// # Errors
///
/// - 400 with `{"Error": "<message>"}` if name or email is invalid
/// - 404 `user not found` if no row matched
/// - 500 with the store error text on store failure
pub async fn update_user_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<RecordPayload>,
) -> Result<Response, AppError> {
    let body = state.user_service.update(&id, payload.into()).await?;
    Ok(json_response(StatusCode::OK, body))
}

/// Deletes a user and evicts its cache entry.
///
/// # Endpoint
///
/// `DELETE /users/{id}`
///
/// # Errors
///
/// - 404 `user not found` if no row matched
/// - 500 with the store error text on store failure
pub async fn delete_user_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<(StatusCode, &'static str), AppError> {
    state.user_service.delete(&id).await?;
    tracing::info!(id = %id, "User deleted");
    Ok((StatusCode::OK, "user deleted"))
}
