//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::{CheckStatus, HealthChecks, HealthResponse};
use crate::error::StoreError;
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Relational store**: `SELECT 1`
/// 2. **Document store**: `ping` command
/// 3. **Cache**: Redis PING
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let relational_store = store_check("PostgreSQL", state.user_service.ping().await);
    let document_store = store_check("MongoDB", state.person_service.ping().await);
    let cache = check_cache(&state).await;

    let all_healthy = relational_store.is_ok() && document_store.is_ok() && cache.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            relational_store,
            document_store,
            cache,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

fn store_check(name: &str, outcome: Result<(), StoreError>) -> CheckStatus {
    match outcome {
        Ok(()) => CheckStatus::ok(format!("{} connected", name)),
        Err(e) => CheckStatus::error(format!("{} error: {}", name, e)),
    }
}

/// Checks cache connectivity via PING command.
async fn check_cache(state: &AppState) -> CheckStatus {
    if state.cache.health_check().await {
        CheckStatus::ok("Cache connected")
    } else {
        CheckStatus::error("Cache connection failed")
    }
}
