//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure for services:
//! - Password hashing (Argon2id, salted, tunable cost)
//! - RS256 JWT issuance and validation with PEM key loading
//! - Authentication coordination
//!
//! Verification needs only the public key ([`JwtVerifier`]); issuance needs the
//! full key pair ([`JwtHandler`], [`Authenticator`]).
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, Identity, KeyMaterial};
//! use chrono::Duration;
//!
//! let keys = KeyMaterial::from_pem(
//!     include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/../fixtures/keys/issuer_private.pem")),
//!     include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/../fixtures/keys/issuer_public.pem")),
//! )
//! .unwrap();
//! let auth = Authenticator::new(keys, Duration::hours(24));
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let identity = Identity::new(7, "alice");
//! let result = auth.authenticate("password123", &hash, &identity).unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.identity(), identity);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::Identity;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::JwtVerifier;
pub use jwt::KeyLoadError;
pub use jwt::KeyMaterial;
pub use password::PasswordError;
pub use password::PasswordHasher;
