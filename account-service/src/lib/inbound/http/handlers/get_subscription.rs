use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::subscription::errors::SubscriptionError;
use crate::domain::subscription::models::Subscription;
use crate::domain::subscription::models::SubscriptionId;
use crate::domain::subscription::ports::SubscriptionServicePort;
use crate::inbound::http::router::AppState;

pub async fn get_subscription(
    State(state): State<AppState>,
    Path(subscription_id): Path<String>,
) -> Result<ApiSuccess<SubscriptionResponseData>, ApiError> {
    let subscription_id =
        SubscriptionId::from_string(&subscription_id).map_err(SubscriptionError::from)?;

    state
        .subscription_service
        .get_subscription(&subscription_id)
        .await
        .map_err(ApiError::from)
        .map(|ref subscription| ApiSuccess::new(StatusCode::OK, subscription.into()))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscriptionResponseData {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Subscription> for SubscriptionResponseData {
    fn from(subscription: &Subscription) -> Self {
        Self {
            id: subscription.id.as_i64(),
            name: subscription.name.clone(),
            description: subscription.description.clone(),
            price: subscription.price,
            created_at: subscription.created_at,
            updated_at: subscription.updated_at,
        }
    }
}
