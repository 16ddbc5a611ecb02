use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::http::middleware::bearer_token;
use crate::inbound::http::router::AppState;

/// Lets another service check a bearer token without holding any key.
pub async fn validate_token(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ApiSuccess<ValidateTokenResponseData>, ApiError> {
    let token = bearer_token(&headers)?;

    let claims = state
        .auth_service
        .validate_token(token, state.validation_timeout)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ValidateTokenResponseData {
            valid: true,
            user_id: claims.sub,
            username: claims.username,
            issued_at: claims.iat,
            expires_at: claims.exp,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidateTokenResponseData {
    pub valid: bool,
    pub user_id: String,
    pub username: String,
    pub issued_at: i64,
    pub expires_at: i64,
}
