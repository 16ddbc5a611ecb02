use std::fs;
use std::path::Path;

use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::errors::KeyKind;
use super::errors::KeyLoadError;

/// A matching RSA key pair: the private half signs, the public half verifies.
///
/// Loaded once at process start and read-only afterwards.
#[derive(Clone)]
pub struct KeyMaterial {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl KeyMaterial {
    /// Build key material from PEM bytes.
    ///
    /// # Arguments
    /// * `private_pem` - PKCS#1 or PKCS#8 RSA private key
    /// * `public_pem` - SPKI or PKCS#1 RSA public key
    ///
    /// # Errors
    /// * `Parse` - Either key is not a usable RSA key
    /// * `MismatchedPair` - The keys do not belong together
    pub fn from_pem(private_pem: &[u8], public_pem: &[u8]) -> Result<Self, KeyLoadError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_pem).map_err(|e| KeyLoadError::Parse {
            kind: KeyKind::Private,
            reason: e.to_string(),
        })?;
        let decoding_key = decoding_key_from_pem(public_pem)?;

        ensure_same_pair(&encoding_key, &decoding_key)?;

        Ok(Self {
            encoding_key,
            decoding_key,
        })
    }

    /// Read and parse both keys from PEM files.
    ///
    /// # Errors
    /// * `Read` - A file could not be read
    /// * `Parse` - Either key is not a usable RSA key
    /// * `MismatchedPair` - The keys do not belong together
    pub fn from_files(
        private_key_path: impl AsRef<Path>,
        public_key_path: impl AsRef<Path>,
    ) -> Result<Self, KeyLoadError> {
        let private_pem = read_key_file(private_key_path.as_ref(), KeyKind::Private)?;
        let public_pem = read_key_file(public_key_path.as_ref(), KeyKind::Public)?;

        Self::from_pem(&private_pem, &public_pem)
    }

    pub(crate) fn into_parts(self) -> (EncodingKey, DecodingKey) {
        (self.encoding_key, self.decoding_key)
    }
}

/// Parse a public verification key from PEM bytes.
pub fn decoding_key_from_pem(public_pem: &[u8]) -> Result<DecodingKey, KeyLoadError> {
    DecodingKey::from_rsa_pem(public_pem).map_err(|e| KeyLoadError::Parse {
        kind: KeyKind::Public,
        reason: e.to_string(),
    })
}

pub(crate) fn read_key_file(path: &Path, kind: KeyKind) -> Result<Vec<u8>, KeyLoadError> {
    fs::read(path).map_err(|e| KeyLoadError::Read {
        kind,
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn ensure_same_pair(
    encoding_key: &EncodingKey,
    decoding_key: &DecodingKey,
) -> Result<(), KeyLoadError> {
    let probe = serde_json::json!({ "probe": "key-pair" });

    // A private key that parses but cannot sign surfaces here.
    let token = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &probe, encoding_key)
        .map_err(|e| KeyLoadError::Parse {
            kind: KeyKind::Private,
            reason: e.to_string(),
        })?;

    let mut validation = Validation::new(Algorithm::RS256);
    validation.required_spec_claims.clear();
    validation.validate_exp = false;

    jsonwebtoken::decode::<serde_json::Value>(&token, decoding_key, &validation)
        .map(|_| ())
        .map_err(|_| KeyLoadError::MismatchedPair)
}
