use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;

use super::list_user_subscriptions::UserSubscriptionResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::models::AuthenticatedUser;
use crate::domain::subscription::errors::SubscriptionError;
use crate::domain::subscription::models::AssignSubscriptionCommand;
use crate::domain::subscription::models::SubscriptionId;
use crate::domain::subscription::ports::SubscriptionServicePort;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

pub async fn assign_subscription(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    Path((user_id, subscription_id)): Path<(String, String)>,
    Json(body): Json<AssignSubscriptionRequest>,
) -> Result<ApiSuccess<UserSubscriptionResponseData>, ApiError> {
    let user_id = UserId::from_string(&user_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    caller.ensure_owns(&user_id)?;
    let subscription_id =
        SubscriptionId::from_string(&subscription_id).map_err(SubscriptionError::from)?;

    state
        .subscription_service
        .assign_subscription(&user_id, &subscription_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref created| ApiSuccess::new(StatusCode::CREATED, created.into()))
}

/// HTTP request body for assigning a subscription (raw JSON)
#[derive(Debug, Clone, Deserialize)]
pub struct AssignSubscriptionRequest {
    #[serde(rename = "type")]
    kind: String,
    company_name: Option<String>,
    #[serde(default)]
    role: String,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
}

impl AssignSubscriptionRequest {
    fn try_into_command(self) -> Result<AssignSubscriptionCommand, SubscriptionError> {
        Ok(AssignSubscriptionCommand {
            kind: self.kind.parse()?,
            company_name: self.company_name.filter(|name| !name.is_empty()),
            role: self.role,
            start_date: self.start_date,
            end_date: self.end_date,
        })
    }
}
