//! API route configuration.
//!
//! Two parallel resource families share one handler shape and differ only in
//! the store behind them.

use crate::api::handlers::{
    create_person_handler, create_user_handler, delete_person_handler, delete_user_handler,
    get_person_handler, get_user_handler, update_person_handler, update_user_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes backed by the relational store.
///
/// # Endpoints
///
/// - `POST   /users`        - Create a user
/// - `GET    /users/{id}`   - Read a user (cache first)
/// - `PUT    /users/{id}`   - Replace name and email
/// - `DELETE /users/{id}`   - Delete a user
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/users", post(create_user_handler)).route(
        "/users/{id}",
        get(get_user_handler)
            .put(update_user_handler)
            .delete(delete_user_handler),
    )
}

/// Routes backed by the document store.
///
/// # Endpoints
///
/// - `POST   /persons`        - Create a person
/// - `GET    /persons/{id}`   - Read a person (cache first)
/// - `PUT    /persons/{id}`   - Replace name and email
/// - `DELETE /persons/{id}`   - Delete a person
pub fn person_routes() -> Router<AppState> {
    Router::new().route("/persons", post(create_person_handler)).route(
        "/persons/{id}",
        get(get_person_handler)
            .put(update_person_handler)
            .delete(delete_person_handler),
    )
}
