use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::domain::keys::KeyError;
use crate::domain::validation::ValidationError;

/// Failure reported by a backing store.
///
/// The message of the underlying driver error is surfaced verbatim to clients.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Sql(#[from] sqlx::Error),
    #[error("{0}")]
    Document(#[from] mongodb::error::Error),
    #[error("store operation timed out")]
    Timeout,
    #[error("{0}")]
    Unexpected(String),
}

/// Errors returned from HTTP handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Rejected name or email. Body: `{"Error": "<message>"}`.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Path identifier is not a valid object id.
    #[error("invalid id format")]
    InvalidId,
    #[error("user not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// Maps a key parse failure on a read or update path.
    pub fn from_key_error(err: KeyError) -> Self {
        match err {
            KeyError::Unmatchable => Self::NotFound,
            KeyError::Malformed => Self::InvalidId,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidId => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Store(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        Self::Internal(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::Validation(e) => {
                (status, Json(json!({ "Error": e.to_string() }))).into_response()
            }
            AppError::Store(e) => {
                tracing::error!(error = %e, "Store operation failed");
                (status, e.to_string()).into_response()
            }
            other => (status, other.to_string()).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::from(ValidationError::EmptyName).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::InvalidId.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::from(StoreError::Timeout).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_key_error_mapping() {
        assert!(matches!(
            AppError::from_key_error(KeyError::Unmatchable),
            AppError::NotFound
        ));
        assert!(matches!(
            AppError::from_key_error(KeyError::Malformed),
            AppError::InvalidId
        ));
    }

    #[test]
    fn test_store_message_is_verbatim() {
        let err = AppError::from(StoreError::Unexpected("connection reset".to_string()));
        assert_eq!(err.to_string(), "connection reset");
        assert_eq!(AppError::NotFound.to_string(), "user not found");
    }
}
