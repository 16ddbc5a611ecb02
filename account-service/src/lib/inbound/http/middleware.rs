use std::collections::HashMap;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::extract::Path;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::auth::models::AuthenticatedUser;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

const BEARER_SCHEME: &str = "Bearer";

/// Path segment naming the owner of an ownership-scoped resource.
pub const OWNER_PATH_PARAM: &str = "user_id";

/// Middleware that validates the bearer token and binds the caller's identity
/// into request extensions. Nothing downstream runs unless validation succeeds.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())?.to_owned();

    let claims = state
        .auth_service
        .validate_token(&token, state.validation_timeout)
        .await?;

    let user = AuthenticatedUser::try_from(&claims).map_err(|e| {
        tracing::warn!(sub = %claims.sub, "Token subject is not a user ID");
        ApiError::from(e)
    })?;

    tracing::debug!(user_id = %user.user_id, "Request authenticated");

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Middleware for ownership-scoped routes: the `user_id` path segment must
/// name the authenticated caller. Must be layered inside [`authenticate`].
pub async fn require_owner(
    user: AuthenticatedUser,
    Path(params): Path<HashMap<String, String>>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let raw_owner = params.get(OWNER_PATH_PARAM).ok_or_else(|| {
        ApiError::internal(format!(
            "route {} has no {} segment",
            req.uri().path(),
            OWNER_PATH_PARAM
        ))
    })?;

    let owner =
        UserId::from_string(raw_owner).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    if let Err(e) = user.ensure_owns(&owner) {
        tracing::warn!(
            user_id = %user.user_id,
            owner_id = %owner,
            path = %req.uri().path(),
            "Rejected access to another user's resource"
        );
        return Err(e.into());
    }

    Ok(next.run(req).await)
}

/// Extract the token from `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("no token provided".to_string()))?;

    let value = value
        .to_str()
        .map_err(|_| ApiError::Unauthorized("invalid authorization header".to_string()))?;

    // Scheme names are case-insensitive.
    let token = value
        .split_once(' ')
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case(BEARER_SCHEME))
        .map(|(_, token)| token)
        .ok_or_else(|| {
            ApiError::Unauthorized(
                "invalid authorization header format, expected: Bearer <token>".to_string(),
            )
        })?;

    let token = token.trim();
    if token.is_empty() {
        return Err(ApiError::Unauthorized("no token provided".to_string()));
    }

    Ok(token)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("no token provided".to_string()))
    }
}
