use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Duration;
use chrono::Months;
use chrono::Utc;

use crate::domain::subscription::errors::SubscriptionIdError;
use crate::domain::subscription::errors::SubscriptionKindError;
use crate::domain::subscription::errors::SubscriptionPeriodError;
use crate::domain::user::models::UserId;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub i64);

        impl $name {
            /// # Errors
            /// * `InvalidFormat` - String is not a positive integer
            pub fn from_string(s: &str) -> Result<Self, SubscriptionIdError> {
                match s.parse::<i64>() {
                    Ok(id) if id > 0 => Ok(Self(id)),
                    Ok(id) => Err(SubscriptionIdError::InvalidFormat(format!(
                        "{} is not a positive identifier",
                        id
                    ))),
                    Err(e) => Err(SubscriptionIdError::InvalidFormat(e.to_string())),
                }
            }

            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

numeric_id!(
    /// Catalog subscription identifier
    SubscriptionId
);

numeric_id!(
    /// Identifier of a user's assignment to a catalog subscription
    UserSubscriptionId
);

/// Catalog entry a user can subscribe to.
#[derive(Debug, Clone, PartialEq)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Billing scope of a user subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionKind {
    Individual,
    Enterprise,
}

impl SubscriptionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionKind::Individual => "individual",
            SubscriptionKind::Enterprise => "enterprise",
        }
    }
}

impl FromStr for SubscriptionKind {
    type Err = SubscriptionKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "individual" => Ok(SubscriptionKind::Individual),
            "enterprise" => Ok(SubscriptionKind::Enterprise),
            other => Err(SubscriptionKindError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for SubscriptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated start/end window of a user subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionPeriod {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl SubscriptionPeriod {
    /// How far in the past a start date may lie.
    const START_GRACE_HOURS: i64 = 24;
    const DEFAULT_LENGTH_MONTHS: u32 = 12;

    /// Build a period, defaulting the start to `now` and the end to one year
    /// after the start.
    ///
    /// # Errors
    /// * `EndBeforeStart` - `end` precedes `start`
    /// * `StartInPast` - `start` is more than 24 hours before `now`
    pub fn new(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<Self, SubscriptionPeriodError> {
        let start = start.unwrap_or(now);
        let end = match end {
            Some(end) => end,
            None => start
                .checked_add_months(Months::new(Self::DEFAULT_LENGTH_MONTHS))
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        };
        Self::checked(start, end, now)
    }

    /// Validate an explicit start/end pair.
    ///
    /// # Errors
    /// * `EndBeforeStart` - `end` precedes `start`
    /// * `StartInPast` - `start` is more than 24 hours before `now`
    pub fn checked(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Self, SubscriptionPeriodError> {
        if end < start {
            return Err(SubscriptionPeriodError::EndBeforeStart);
        }
        if start < now - Duration::hours(Self::START_GRACE_HOURS) {
            return Err(SubscriptionPeriodError::StartInPast);
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

/// A user's assignment to a catalog subscription.
#[derive(Debug, Clone, PartialEq)]
pub struct UserSubscription {
    pub id: UserSubscriptionId,
    pub user_id: UserId,
    pub subscription_id: SubscriptionId,
    pub kind: SubscriptionKind,
    pub company_name: Option<String>,
    pub role: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Command to assign a catalog subscription to a user.
#[derive(Debug, Clone)]
pub struct AssignSubscriptionCommand {
    pub kind: SubscriptionKind,
    pub company_name: Option<String>,
    pub role: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

/// Partial update of a user subscription; only provided fields change.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserSubscriptionCommand {
    pub kind: Option<SubscriptionKind>,
    pub company_name: Option<String>,
    pub role: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
}

impl UpdateUserSubscriptionCommand {
    fn touches_period(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }
}

/// A user subscription ready to be persisted.
#[derive(Debug, Clone)]
pub struct NewUserSubscription {
    pub user_id: UserId,
    pub subscription_id: SubscriptionId,
    pub kind: SubscriptionKind,
    pub company_name: Option<String>,
    pub role: String,
    pub period: SubscriptionPeriod,
    pub created_at: DateTime<Utc>,
}

impl UserSubscription {
    /// Apply a partial update, re-validating the period if either date moved.
    ///
    /// # Errors
    /// * `SubscriptionPeriodError` - The resulting period is invalid
    pub fn apply(
        &mut self,
        command: UpdateUserSubscriptionCommand,
        now: DateTime<Utc>,
    ) -> Result<(), SubscriptionPeriodError> {
        if command.touches_period() {
            let period = SubscriptionPeriod::checked(
                command.start_date.unwrap_or(self.start_date),
                command.end_date.unwrap_or(self.end_date),
                now,
            )?;
            self.start_date = period.start();
            self.end_date = period.end();
        }

        if let Some(kind) = command.kind {
            self.kind = kind;
        }
        if let Some(company_name) = command.company_name {
            self.company_name = Some(company_name);
        }
        if let Some(role) = command.role {
            self.role = role;
        }
        if let Some(is_active) = command.is_active {
            self.is_active = is_active;
        }
        self.updated_at = now;

        Ok(())
    }
}
