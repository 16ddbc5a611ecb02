use std::path::Path;

use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::decode_header;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::Identity;
use super::errors::JwtError;
use super::errors::KeyKind;
use super::errors::KeyLoadError;
use super::keys::decoding_key_from_pem;
use super::keys::read_key_file;
use super::keys::KeyMaterial;

/// The only algorithm tokens are signed and accepted with.
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::RS256;

/// Verifies tokens with the public half of the key pair.
///
/// Holds no signing capability, so it can be handed to any service that needs
/// to check tokens without trusting it with the private key.
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    /// Create a verifier for RS256 tokens.
    ///
    /// Validation has no clock leeway and requires `exp`, `nbf` and `sub`.
    pub fn new(decoding_key: DecodingKey) -> Self {
        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.leeway = 0;
        validation.validate_nbf = true;
        validation.set_required_spec_claims(&["exp", "nbf", "sub"]);

        Self {
            decoding_key,
            validation,
        }
    }

    /// Create a verifier from a PEM-encoded public key.
    pub fn from_public_pem(public_pem: &[u8]) -> Result<Self, KeyLoadError> {
        decoding_key_from_pem(public_pem).map(Self::new)
    }

    /// Create a verifier from a PEM public key file.
    pub fn from_public_key_file(path: impl AsRef<Path>) -> Result<Self, KeyLoadError> {
        let pem = read_key_file(path.as_ref(), KeyKind::Public)?;
        Self::from_public_pem(&pem)
    }

    /// Only accept tokens stamped with this issuer.
    pub fn with_issuer(mut self, issuer: &str) -> Self {
        self.validation.set_issuer(&[issuer]);
        self
    }

    /// Verify a token and return its claims.
    ///
    /// The header algorithm is checked before anything else; a token that
    /// declares any algorithm other than RS256 is rejected regardless of its
    /// signature bytes.
    ///
    /// # Errors
    /// * `MalformedToken` - Not a well-formed compact JWT, or claims missing
    /// * `UnexpectedAlgorithm` - Header declares a different algorithm
    /// * `InvalidSignature` - Signature does not verify under the public key
    /// * `Expired` - `exp` is in the past
    /// * `NotYetValid` - `nbf` is in the future
    /// * `InvalidIssuer` - Issuer does not match the configured one
    pub fn parse(&self, token: &str) -> Result<Claims, JwtError> {
        let header = decode_header(token)?;

        if header.alg != SIGNING_ALGORITHM {
            return Err(JwtError::UnexpectedAlgorithm(format!("{:?}", header.alg)));
        }

        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;

        Ok(token_data.claims)
    }
}

/// JWT token handler for issuing and parsing tokens.
///
/// Signs with the private key (RS256) and delegates parsing to a
/// [`JwtVerifier`] built from the matching public key.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    verifier: JwtVerifier,
    issuer: Option<String>,
}

impl JwtHandler {
    /// Create a handler from a loaded key pair.
    pub fn new(keys: KeyMaterial) -> Self {
        let (encoding_key, decoding_key) = keys.into_parts();

        Self {
            encoding_key,
            verifier: JwtVerifier::new(decoding_key),
            issuer: None,
        }
    }

    /// Stamp issued tokens with `issuer` and require it when parsing.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        let issuer = issuer.into();
        self.verifier = self.verifier.with_issuer(&issuer);
        self.issuer = Some(issuer);
        self
    }

    /// Issue a token for an identity.
    ///
    /// Sets `iat` and `nbf` to now and `exp` to now + `expires_in`.
    ///
    /// # Errors
    /// * `SigningFailed` - The private key could not produce a signature
    pub fn issue(&self, identity: &Identity, expires_in: Duration) -> Result<String, JwtError> {
        let mut claims = Claims::for_identity(identity, Utc::now(), expires_in);
        if let Some(issuer) = &self.issuer {
            claims = claims.with_issuer(issuer.clone());
        }

        self.sign(&claims)
    }

    /// Sign prepared claims as-is.
    pub fn sign(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::new(SIGNING_ALGORITHM), claims, &self.encoding_key)
            .map_err(|e| JwtError::SigningFailed(e.to_string()))
    }

    /// Verify a token and return its claims.
    pub fn parse(&self, token: &str) -> Result<Claims, JwtError> {
        self.verifier.parse(token)
    }
}
