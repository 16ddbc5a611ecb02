use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::Identity;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AuthOperation;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::LoginOutcome;
use crate::domain::auth::models::OutcomeStatus;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::OutcomeRecorder;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;

/// Login and token validation over the user store.
///
/// Holds no mutable state: the authenticator's key pair is read-only and the
/// repository is expected to be safe for concurrent use.
pub struct AuthService<UR, OR>
where
    UR: UserRepository,
    OR: OutcomeRecorder,
{
    repository: Arc<UR>,
    recorder: Arc<OR>,
    authenticator: Arc<Authenticator>,
}

impl<UR, OR> AuthService<UR, OR>
where
    UR: UserRepository,
    OR: OutcomeRecorder,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User lookup used to fetch stored credentials
    /// * `recorder` - Receives one outcome per login/validation attempt
    /// * `authenticator` - Password verification and token issuance
    pub fn new(repository: Arc<UR>, recorder: Arc<OR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            recorder,
            authenticator,
        }
    }

    async fn attempt_login(&self, command: LoginCommand) -> Result<LoginOutcome, AuthError> {
        let LoginCommand { username, password } = command;

        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidInput(
                "username and password are required".to_string(),
            ));
        }

        let username = match Username::new(username.to_string()) {
            Ok(username) => username,
            Err(e) => {
                tracing::warn!(error = %e, "Login failed: malformed username");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let user = self
            .repository
            .find_by_username(&username)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Login failed: user lookup error");
                AuthError::Internal("user lookup failed".to_string())
            })?;

        let Some(user) = user else {
            // Equalize work with the found-user path.
            let _ = self
                .run_blocking(move |authenticator| authenticator.hash_password(&password))
                .await?;
            tracing::warn!(username = %username, "Login failed: unknown username");
            return Err(AuthError::InvalidCredentials);
        };

        let identity = Identity::new(user.id, user.username.as_str());
        let password_hash = user.password_hash.clone();

        let result = self
            .run_blocking(move |authenticator| {
                authenticator.authenticate(&password, &password_hash, &identity)
            })
            .await?
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::warn!(username = %username, "Login failed: wrong password");
                    AuthError::InvalidCredentials
                }
                AuthenticationError::PasswordError(err) => {
                    tracing::error!(user_id = %user.id, error = %err, "Stored password hash unreadable");
                    AuthError::Internal("password verification failed".to_string())
                }
                AuthenticationError::JwtError(err) => {
                    tracing::error!(user_id = %user.id, error = %err, "Token signing failed");
                    AuthError::Internal("token generation failed".to_string())
                }
            })?;

        tracing::info!(user_id = %user.id, username = %user.username, "Login succeeded");

        Ok(LoginOutcome {
            user: user.without_credentials(),
            token: result.access_token,
        })
    }

    async fn verify_token(&self, token: &str) -> Result<auth::Claims, AuthError> {
        if token.is_empty() {
            return Err(AuthError::InvalidToken);
        }

        let token = token.to_owned();
        self.run_blocking(move |authenticator| authenticator.validate_token(&token))
            .await?
            .map_err(|e| {
                tracing::warn!(reason = %e, "Token validation failed");
                AuthError::InvalidToken
            })
    }

    /// Run CPU-bound credential or signature work off the async workers, so
    /// the caller's timeout can fire while it is in progress.
    async fn run_blocking<T, F>(&self, work: F) -> Result<T, AuthError>
    where
        F: FnOnce(&Authenticator) -> T + Send + 'static,
        T: Send + 'static,
    {
        let authenticator = Arc::clone(&self.authenticator);
        tokio::task::spawn_blocking(move || work(&authenticator))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Blocking auth task failed");
                AuthError::Internal("authentication task failed".to_string())
            })
    }

    fn record(&self, operation: AuthOperation, status: OutcomeStatus) {
        self.recorder.record_outcome(operation, status);
    }
}

#[async_trait]
impl<UR, OR> AuthServicePort for AuthService<UR, OR>
where
    UR: UserRepository,
    OR: OutcomeRecorder,
{
    async fn login(
        &self,
        command: LoginCommand,
        timeout: Duration,
    ) -> Result<LoginOutcome, AuthError> {
        let result = match tokio::time::timeout(timeout, self.attempt_login(command)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(timeout_ms = timeout.as_millis() as u64, "Login timed out");
                Err(AuthError::Timeout)
            }
        };

        self.record(AuthOperation::Login, OutcomeStatus::of(&result));
        result
    }

    async fn validate_token(
        &self,
        token: &str,
        timeout: Duration,
    ) -> Result<auth::Claims, AuthError> {
        let result = match tokio::time::timeout(timeout, self.verify_token(token)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    timeout_ms = timeout.as_millis() as u64,
                    "Token validation timed out"
                );
                Err(AuthError::Timeout)
            }
        };

        self.record(AuthOperation::ValidateToken, OutcomeStatus::of(&result));
        result
    }
}
