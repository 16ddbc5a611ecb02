use thiserror::Error;

/// Errors surfaced by login, token validation and authorization.
///
/// Credential and token failures are deliberately coarse: callers cannot tell
/// an unknown username from a wrong password, or an expired token from a
/// forged one. The specific reason is logged where it is detected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Access to this resource is forbidden")]
    Forbidden,

    #[error("Operation timed out")]
    Timeout,

    #[error("Internal error: {0}")]
    Internal(String),
}
