use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::models::AuthenticatedUser;
use crate::domain::subscription::models::UserSubscription;
use crate::domain::subscription::ports::SubscriptionServicePort;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

pub async fn list_user_subscriptions(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<Vec<UserSubscriptionResponseData>>, ApiError> {
    let user_id = UserId::from_string(&user_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    caller.ensure_owns(&user_id)?;

    let subscriptions = state
        .subscription_service
        .list_user_subscriptions(&user_id)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        subscriptions.iter().map(Into::into).collect(),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSubscriptionResponseData {
    pub id: i64,
    pub user_id: i64,
    pub subscription_id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    pub role: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&UserSubscription> for UserSubscriptionResponseData {
    fn from(subscription: &UserSubscription) -> Self {
        Self {
            id: subscription.id.as_i64(),
            user_id: subscription.user_id.as_i64(),
            subscription_id: subscription.subscription_id.as_i64(),
            kind: subscription.kind.as_str().to_string(),
            company_name: subscription.company_name.clone(),
            role: subscription.role.clone(),
            start_date: subscription.start_date,
            end_date: subscription.end_date,
            is_active: subscription.is_active,
            created_at: subscription.created_at,
            updated_at: subscription.updated_at,
        }
    }
}
