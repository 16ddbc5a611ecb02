use std::fmt;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::auth::errors::AuthError;

/// Raw login input as received from the client.
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

impl LoginCommand {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Successful login: the public identity and a signed access token.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// User with the password hash cleared
    pub user: User,
    pub token: String,
}

/// Per-request identity bound by the authorization guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: String,
}

impl AuthenticatedUser {
    /// Ownership check: the caller may only act on their own resources.
    ///
    /// # Errors
    /// * `Forbidden` - `owner` is a different user
    pub fn ensure_owns(&self, owner: &UserId) -> Result<(), AuthError> {
        if &self.user_id == owner {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }
}

impl TryFrom<&auth::Claims> for AuthenticatedUser {
    type Error = AuthError;

    fn try_from(claims: &auth::Claims) -> Result<Self, Self::Error> {
        let user_id = UserId::from_string(&claims.sub).map_err(|_| AuthError::InvalidToken)?;

        Ok(Self {
            user_id,
            username: claims.username.clone(),
        })
    }
}

/// Operation label reported to the outcome recorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOperation {
    Login,
    ValidateToken,
}

impl AuthOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthOperation::Login => "login",
            AuthOperation::ValidateToken => "validate_token",
        }
    }
}

/// Status label reported to the outcome recorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    Success,
    Failed,
    TimedOut,
}

impl OutcomeStatus {
    pub fn of<T>(result: &Result<T, AuthError>) -> Self {
        match result {
            Ok(_) => OutcomeStatus::Success,
            Err(AuthError::Timeout) => OutcomeStatus::TimedOut,
            Err(_) => OutcomeStatus::Failed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeStatus::Success => "success",
            OutcomeStatus::Failed => "failed",
            OutcomeStatus::TimedOut => "timed_out",
        }
    }
}
