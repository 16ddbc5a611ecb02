use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::subscription::errors::SubscriptionError;
use crate::domain::subscription::models::AssignSubscriptionCommand;
use crate::domain::subscription::models::NewUserSubscription;
use crate::domain::subscription::models::Subscription;
use crate::domain::subscription::models::SubscriptionId;
use crate::domain::subscription::models::SubscriptionPeriod;
use crate::domain::subscription::models::UpdateUserSubscriptionCommand;
use crate::domain::subscription::models::UserSubscription;
use crate::domain::subscription::models::UserSubscriptionId;
use crate::domain::subscription::ports::SubscriptionRepository;
use crate::domain::subscription::ports::SubscriptionServicePort;
use crate::domain::user::models::UserId;

/// Domain service for the subscription catalog and user assignments.
pub struct SubscriptionService<SR>
where
    SR: SubscriptionRepository,
{
    repository: Arc<SR>,
}

impl<SR> SubscriptionService<SR>
where
    SR: SubscriptionRepository,
{
    pub fn new(repository: Arc<SR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<SR> SubscriptionServicePort for SubscriptionService<SR>
where
    SR: SubscriptionRepository,
{
    async fn get_subscription(
        &self,
        id: &SubscriptionId,
    ) -> Result<Subscription, SubscriptionError> {
        self.repository
            .find_subscription(id)
            .await?
            .ok_or(SubscriptionError::NotFound(id.to_string()))
    }

    async fn list_user_subscriptions(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<UserSubscription>, SubscriptionError> {
        let subscriptions = self.repository.list_by_user(user_id).await?;

        tracing::debug!(
            user_id = %user_id,
            count = subscriptions.len(),
            "User subscriptions retrieved"
        );

        Ok(subscriptions)
    }

    async fn assign_subscription(
        &self,
        user_id: &UserId,
        subscription_id: &SubscriptionId,
        command: AssignSubscriptionCommand,
    ) -> Result<UserSubscription, SubscriptionError> {
        let catalog_entry = self.get_subscription(subscription_id).await?;

        let now = Utc::now();
        let period = SubscriptionPeriod::new(command.start_date, command.end_date, now)?;

        let created = self
            .repository
            .create_user_subscription(NewUserSubscription {
                user_id: *user_id,
                subscription_id: catalog_entry.id,
                kind: command.kind,
                company_name: command.company_name,
                role: command.role,
                period,
                created_at: now,
            })
            .await?;

        tracing::info!(
            user_id = %user_id,
            subscription_id = %subscription_id,
            user_subscription_id = %created.id,
            "Subscription assigned"
        );

        Ok(created)
    }

    async fn update_user_subscription(
        &self,
        user_id: &UserId,
        id: &UserSubscriptionId,
        command: UpdateUserSubscriptionCommand,
    ) -> Result<UserSubscription, SubscriptionError> {
        let mut subscription = self
            .repository
            .find_user_subscription(id)
            .await?
            .ok_or(SubscriptionError::UserSubscriptionNotFound(id.to_string()))?;

        if &subscription.user_id != user_id {
            tracing::warn!(
                user_id = %user_id,
                owner_id = %subscription.user_id,
                user_subscription_id = %id,
                "Rejected update of another user's subscription"
            );
            return Err(SubscriptionError::NotOwned);
        }

        subscription.apply(command, Utc::now())?;

        let updated = self.repository.update_user_subscription(subscription).await?;

        tracing::info!(
            user_id = %user_id,
            user_subscription_id = %id,
            "Subscription updated"
        );

        Ok(updated)
    }
}
