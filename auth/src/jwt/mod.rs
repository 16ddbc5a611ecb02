pub mod claims;
pub mod errors;
pub mod handler;
pub mod keys;

pub use claims::Claims;
pub use claims::Identity;
pub use errors::JwtError;
pub use errors::KeyKind;
pub use errors::KeyLoadError;
pub use handler::JwtHandler;
pub use handler::JwtVerifier;
pub use handler::SIGNING_ALGORITHM;
pub use keys::KeyMaterial;
