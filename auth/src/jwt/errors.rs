use jsonwebtoken::errors::ErrorKind;
use thiserror::Error;

/// Error type for JWT operations.
///
/// Parse failures keep distinct kinds for diagnostics; callers that face
/// clients are expected to collapse them into a single "invalid token".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Unexpected signing algorithm: {0}")]
    UnexpectedAlgorithm(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token is not yet valid")]
    NotYetValid,

    #[error("Token issuer is not accepted")]
    InvalidIssuer,
}

impl From<jsonwebtoken::errors::Error> for JwtError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature => JwtError::InvalidSignature,
            ErrorKind::ExpiredSignature => JwtError::Expired,
            ErrorKind::ImmatureSignature => JwtError::NotYetValid,
            ErrorKind::InvalidIssuer => JwtError::InvalidIssuer,
            ErrorKind::InvalidAlgorithm => {
                JwtError::UnexpectedAlgorithm("algorithm does not match key".to_string())
            }
            _ => JwtError::MalformedToken(err.to_string()),
        }
    }
}

/// Error raised while loading signing or verification keys.
///
/// Fatal at startup: a service must not run without both halves of a
/// matching key pair.
#[derive(Debug, Clone, Error)]
pub enum KeyLoadError {
    #[error("Failed to read {kind} key from {path}: {reason}")]
    Read {
        kind: KeyKind,
        path: String,
        reason: String,
    },

    #[error("Failed to parse {kind} key: {reason}")]
    Parse { kind: KeyKind, reason: String },

    #[error("Private and public keys are not the same pair")]
    MismatchedPair,
}

/// Which half of the key pair an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Private,
    Public,
}

impl std::fmt::Display for KeyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyKind::Private => f.write_str("private"),
            KeyKind::Public => f.write_str("public"),
        }
    }
}
