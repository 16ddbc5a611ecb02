use thiserror::Error;

/// Error for catalog and user-subscription identifier parsing
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubscriptionIdError {
    #[error("Invalid subscription ID format: {0}")]
    InvalidFormat(String),
}

/// Error for subscription kind parsing
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubscriptionKindError {
    #[error("Unknown subscription kind '{0}' (expected individual or enterprise)")]
    Unknown(String),
}

/// Error for subscription period validation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubscriptionPeriodError {
    #[error("End date must not be before start date")]
    EndBeforeStart,

    #[error("Start date cannot be in the past")]
    StartInPast,
}

/// Top-level error for subscription operations
#[derive(Debug, Clone, Error)]
pub enum SubscriptionError {
    #[error("Invalid subscription ID: {0}")]
    InvalidId(#[from] SubscriptionIdError),

    #[error("Invalid subscription kind: {0}")]
    InvalidKind(#[from] SubscriptionKindError),

    #[error("Invalid subscription period: {0}")]
    InvalidPeriod(#[from] SubscriptionPeriodError),

    #[error("Subscription not found: {0}")]
    NotFound(String),

    #[error("User subscription not found: {0}")]
    UserSubscriptionNotFound(String),

    #[error("Subscription does not belong to the specified user")]
    NotOwned,

    #[error("An active subscription to this plan already exists")]
    AlreadyActive,

    #[error("Database error: {0}")]
    DatabaseError(String),
}
