use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

/// Liveness/readiness probe backed by a storage round-trip.
pub async fn health(State(state): State<AppState>) -> Response {
    match state.user_service.check_health().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "healthy", "db": "connected" })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unhealthy" })),
            )
                .into_response()
        }
    }
}
