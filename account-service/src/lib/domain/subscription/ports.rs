use async_trait::async_trait;

use crate::domain::subscription::errors::SubscriptionError;
use crate::domain::subscription::models::AssignSubscriptionCommand;
use crate::domain::subscription::models::NewUserSubscription;
use crate::domain::subscription::models::Subscription;
use crate::domain::subscription::models::SubscriptionId;
use crate::domain::subscription::models::UpdateUserSubscriptionCommand;
use crate::domain::subscription::models::UserSubscription;
use crate::domain::subscription::models::UserSubscriptionId;
use crate::domain::user::models::UserId;

/// Port for subscription domain service operations.
#[async_trait]
pub trait SubscriptionServicePort: Send + Sync + 'static {
    /// Retrieve a catalog entry.
    ///
    /// # Errors
    /// * `NotFound` - Catalog entry does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_subscription(&self, id: &SubscriptionId)
        -> Result<Subscription, SubscriptionError>;

    /// List every subscription assigned to a user.
    async fn list_user_subscriptions(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<UserSubscription>, SubscriptionError>;

    /// Assign a catalog subscription to a user.
    ///
    /// # Errors
    /// * `NotFound` - Catalog entry does not exist
    /// * `InvalidPeriod` - End before start, or start too far in the past
    /// * `AlreadyActive` - The user already holds an unexpired assignment to it
    /// * `DatabaseError` - Database operation failed
    async fn assign_subscription(
        &self,
        user_id: &UserId,
        subscription_id: &SubscriptionId,
        command: AssignSubscriptionCommand,
    ) -> Result<UserSubscription, SubscriptionError>;

    /// Update one of the user's subscriptions.
    ///
    /// # Errors
    /// * `UserSubscriptionNotFound` - Assignment does not exist
    /// * `NotOwned` - Assignment belongs to a different user
    /// * `InvalidPeriod` - Resulting period is invalid
    /// * `DatabaseError` - Database operation failed
    async fn update_user_subscription(
        &self,
        user_id: &UserId,
        id: &UserSubscriptionId,
        command: UpdateUserSubscriptionCommand,
    ) -> Result<UserSubscription, SubscriptionError>;
}

/// Persistence operations for the catalog and user assignments.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync + 'static {
    async fn find_subscription(
        &self,
        id: &SubscriptionId,
    ) -> Result<Option<Subscription>, SubscriptionError>;

    async fn find_user_subscription(
        &self,
        id: &UserSubscriptionId,
    ) -> Result<Option<UserSubscription>, SubscriptionError>;

    async fn list_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<UserSubscription>, SubscriptionError>;

    /// Persist a new assignment.
    ///
    /// # Errors
    /// * `AlreadyActive` - An unexpired assignment for the same user and plan exists
    /// * `DatabaseError` - Database operation failed
    async fn create_user_subscription(
        &self,
        subscription: NewUserSubscription,
    ) -> Result<UserSubscription, SubscriptionError>;

    /// # Errors
    /// * `UserSubscriptionNotFound` - Assignment does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_user_subscription(
        &self,
        subscription: UserSubscription,
    ) -> Result<UserSubscription, SubscriptionError>;
}
