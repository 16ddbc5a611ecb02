use std::time::Duration;

use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AuthOperation;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::LoginOutcome;
use crate::domain::auth::models::OutcomeStatus;

/// Port for login and token validation.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials and issue an access token.
    ///
    /// # Arguments
    /// * `command` - Username and plaintext password
    /// * `timeout` - Upper bound on the whole operation, including user lookup
    ///
    /// # Errors
    /// * `InvalidInput` - Username or password is empty
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `Timeout` - The operation did not finish within `timeout`
    /// * `Internal` - Storage, hashing or signing failure
    async fn login(&self, command: LoginCommand, timeout: Duration)
        -> Result<LoginOutcome, AuthError>;

    /// Verify a bearer token and return its claims.
    ///
    /// # Errors
    /// * `InvalidToken` - Malformed, forged, expired or not-yet-valid token
    /// * `Timeout` - The operation did not finish within `timeout`
    async fn validate_token(&self, token: &str, timeout: Duration)
        -> Result<auth::Claims, AuthError>;
}

/// Observability collaborator notified after every auth outcome.
pub trait OutcomeRecorder: Send + Sync + 'static {
    fn record_outcome(&self, operation: AuthOperation, status: OutcomeStatus);
}
