use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::subscription::errors::SubscriptionError;
use crate::domain::subscription::models::NewUserSubscription;
use crate::domain::subscription::models::Subscription;
use crate::domain::subscription::models::SubscriptionId;
use crate::domain::subscription::models::UserSubscription;
use crate::domain::subscription::models::UserSubscriptionId;
use crate::domain::subscription::ports::SubscriptionRepository;
use crate::domain::user::models::UserId;

const USER_SUBSCRIPTION_COLUMNS: &str = "id, user_id, subscription_id, kind, company_name, role, \
     start_date, end_date, is_active, created_at, updated_at";

pub struct PostgresSubscriptionRepository {
    pool: PgPool,
}

impl PostgresSubscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SubscriptionRow {
    id: i64,
    name: String,
    description: String,
    price: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SubscriptionRow> for Subscription {
    fn from(row: SubscriptionRow) -> Self {
        Subscription {
            id: SubscriptionId(row.id),
            name: row.name,
            description: row.description,
            price: row.price,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct UserSubscriptionRow {
    id: i64,
    user_id: i64,
    subscription_id: i64,
    kind: String,
    company_name: Option<String>,
    role: String,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserSubscriptionRow> for UserSubscription {
    type Error = SubscriptionError;

    fn try_from(row: UserSubscriptionRow) -> Result<Self, Self::Error> {
        Ok(UserSubscription {
            id: UserSubscriptionId(row.id),
            user_id: UserId(row.user_id),
            subscription_id: SubscriptionId(row.subscription_id),
            kind: row.kind.parse()?,
            company_name: row.company_name,
            role: row.role,
            start_date: row.start_date,
            end_date: row.end_date,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn database_error(e: sqlx::Error) -> SubscriptionError {
    SubscriptionError::DatabaseError(e.to_string())
}

#[async_trait]
impl SubscriptionRepository for PostgresSubscriptionRepository {
    async fn find_subscription(
        &self,
        id: &SubscriptionId,
    ) -> Result<Option<Subscription>, SubscriptionError> {
        let row = sqlx::query_as::<_, SubscriptionRow>(
            r#"
            SELECT id, name, description, price, created_at, updated_at
            FROM subscriptions
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.map(Subscription::from))
    }

    async fn find_user_subscription(
        &self,
        id: &UserSubscriptionId,
    ) -> Result<Option<UserSubscription>, SubscriptionError> {
        let row = sqlx::query_as::<_, UserSubscriptionRow>(&format!(
            "SELECT {} FROM user_subscriptions WHERE id = $1",
            USER_SUBSCRIPTION_COLUMNS
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(UserSubscription::try_from).transpose()
    }

    async fn list_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<UserSubscription>, SubscriptionError> {
        let rows = sqlx::query_as::<_, UserSubscriptionRow>(&format!(
            "SELECT {} FROM user_subscriptions WHERE user_id = $1 ORDER BY start_date DESC, id DESC",
            USER_SUBSCRIPTION_COLUMNS
        ))
        .bind(user_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(UserSubscription::try_from).collect()
    }

    async fn create_user_subscription(
        &self,
        subscription: NewUserSubscription,
    ) -> Result<UserSubscription, SubscriptionError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        // Serializes concurrent assignments for the same user until commit.
        sqlx::query("SELECT id FROM users WHERE id = $1 FOR UPDATE")
            .bind(subscription.user_id.as_i64())
            .fetch_optional(&mut *tx)
            .await
            .map_err(database_error)?;

        let active: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM user_subscriptions
            WHERE user_id = $1 AND subscription_id = $2 AND end_date > now()
            "#,
        )
        .bind(subscription.user_id.as_i64())
        .bind(subscription.subscription_id.as_i64())
        .fetch_one(&mut *tx)
        .await
        .map_err(database_error)?;

        if active > 0 {
            return Err(SubscriptionError::AlreadyActive);
        }

        let row = sqlx::query_as::<_, UserSubscriptionRow>(&format!(
            r#"
            INSERT INTO user_subscriptions
                (user_id, subscription_id, kind, company_name, role,
                 start_date, end_date, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, TRUE, $8, $8)
            RETURNING {}
            "#,
            USER_SUBSCRIPTION_COLUMNS
        ))
        .bind(subscription.user_id.as_i64())
        .bind(subscription.subscription_id.as_i64())
        .bind(subscription.kind.as_str())
        .bind(&subscription.company_name)
        .bind(&subscription.role)
        .bind(subscription.period.start())
        .bind(subscription.period.end())
        .bind(subscription.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(database_error)?;

        tx.commit().await.map_err(database_error)?;

        row.try_into()
    }

    async fn update_user_subscription(
        &self,
        subscription: UserSubscription,
    ) -> Result<UserSubscription, SubscriptionError> {
        let result = sqlx::query(
            r#"
            UPDATE user_subscriptions
            SET kind = $2, company_name = $3, role = $4, start_date = $5,
                end_date = $6, is_active = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(subscription.id.as_i64())
        .bind(subscription.kind.as_str())
        .bind(&subscription.company_name)
        .bind(&subscription.role)
        .bind(subscription.start_date)
        .bind(subscription.end_date)
        .bind(subscription.is_active)
        .bind(subscription.updated_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(SubscriptionError::UserSubscriptionNotFound(
                subscription.id.to_string(),
            ));
        }

        Ok(subscription)
    }
}
