use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// The identity a token speaks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject_id: String,
    pub username: String,
}

impl Identity {
    pub fn new(subject_id: impl ToString, username: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.to_string(),
            username: username.into(),
        }
    }
}

/// Identity claims carried by an access token.
///
/// Timestamps are Unix seconds. Immutable once signed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    pub username: String,

    /// Issued at
    pub iat: i64,

    /// Not before
    pub nbf: i64,

    /// Expiration time
    pub exp: i64,

    /// Issuer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

impl Claims {
    /// Build claims for an identity, valid from `now` for `expires_in`.
    ///
    /// # Arguments
    /// * `identity` - Subject and username to embed
    /// * `now` - Issue instant (also used as not-before)
    /// * `expires_in` - Lifetime; a negative duration yields an already expired token
    pub fn for_identity(identity: &Identity, now: DateTime<Utc>, expires_in: Duration) -> Self {
        Self {
            sub: identity.subject_id.clone(),
            username: identity.username.clone(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: (now + expires_in).timestamp(),
            iss: None,
        }
    }

    /// Set issuer.
    pub fn with_issuer(mut self, iss: impl Into<String>) -> Self {
        self.iss = Some(iss.into());
        self
    }

    /// The identity these claims speak for.
    pub fn identity(&self) -> Identity {
        Identity {
            subject_id: self.sub.clone(),
            username: self.username.clone(),
        }
    }
}
