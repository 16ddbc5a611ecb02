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
use crate::domain::subscription::models::SubscriptionKind;
use crate::domain::subscription::models::UpdateUserSubscriptionCommand;
use crate::domain::subscription::models::UserSubscriptionId;
use crate::domain::subscription::ports::SubscriptionServicePort;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// The second path segment names the user subscription, not the catalog entry.
pub async fn update_user_subscription(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    Path((user_id, user_subscription_id)): Path<(String, String)>,
    Json(body): Json<UpdateUserSubscriptionRequest>,
) -> Result<ApiSuccess<UserSubscriptionResponseData>, ApiError> {
    let user_id = UserId::from_string(&user_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    caller.ensure_owns(&user_id)?;
    let user_subscription_id =
        UserSubscriptionId::from_string(&user_subscription_id).map_err(SubscriptionError::from)?;

    state
        .subscription_service
        .update_user_subscription(&user_id, &user_subscription_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref updated| ApiSuccess::new(StatusCode::OK, updated.into()))
}

/// HTTP request body for a partial subscription update (raw JSON)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserSubscriptionRequest {
    #[serde(rename = "type")]
    kind: Option<String>,
    company_name: Option<String>,
    role: Option<String>,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    is_active: Option<bool>,
}

impl UpdateUserSubscriptionRequest {
    fn try_into_command(self) -> Result<UpdateUserSubscriptionCommand, SubscriptionError> {
        let kind = self
            .kind
            .filter(|kind| !kind.is_empty())
            .map(|kind| kind.parse::<SubscriptionKind>())
            .transpose()?;

        Ok(UpdateUserSubscriptionCommand {
            kind,
            company_name: self.company_name,
            role: self.role,
            start_date: self.start_date,
            end_date: self.end_date,
            is_active: self.is_active,
        })
    }
}
