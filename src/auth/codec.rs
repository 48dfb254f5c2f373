//! Token encoding, signing and decoding
//! Produces the three-segment HMAC-SHA256 wire format issued by the
//! registry: `base64url(header).base64url(payload).base64url(signature)`,
//! no padding characters.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::config::AppConfig;

type HmacSha256 = Hmac<Sha256>;

/// Fixed issuer stamped into every token
pub const ISSUER: &str = "registro-api";

/// Serialized token header. Emitted verbatim so the output stays
/// byte-for-byte compatible with tokens already in the wild.
const HEADER_JSON: &str = r#"{"alg":"HS256","typ":"JWT"}"#;

/// Claims carried in the token payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,

    #[serde(rename = "id_usuario")]
    pub user_id: i64,

    #[serde(rename = "nombre_usuario")]
    pub username: String,

    #[serde(rename = "correo")]
    pub email: String,

    #[serde(rename = "id_rol")]
    pub role_id: i64,

    #[serde(rename = "activo")]
    pub active: bool,

    /// Issued at (Unix seconds)
    pub iat: i64,

    /// Expiry (Unix seconds)
    pub exp: i64,

    /// Issuer
    pub iss: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Structural failure, bad signature or undecodable payload.
    /// Collapsed into one variant: callers treat every decode failure
    /// the same way.
    #[error("malformed token")]
    Malformed,

    #[error("claims serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Encoder/decoder for the registry token format
pub struct TokenCodec {
    secret: Vec<u8>,
}

impl TokenCodec {
    pub fn new(secret: &str) -> Self {
        Self {
            secret: secret.as_bytes().to_vec(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.security.token_secret.expose_secret())
    }

    /// Encode and sign a claims set
    pub fn encode(&self, claims: &Claims) -> Result<String, CodecError> {
        let header = URL_SAFE_NO_PAD.encode(HEADER_JSON.as_bytes());
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims)?);

        let signing_input = format!("{header}.{payload}");
        let signature = self.sign(signing_input.as_bytes());

        Ok(format!("{signing_input}.{signature}"))
    }

    /// Verify the signature and decode the payload
    pub fn decode(&self, token: &str) -> Result<Claims, CodecError> {
        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != 3 || segments.iter().any(|s| s.is_empty()) {
            return Err(CodecError::Malformed);
        }

        let signing_input = format!("{}.{}", segments[0], segments[1]);
        let expected = self.sign(signing_input.as_bytes());

        // Plain string equality, matching the verifier this replaces.
        if expected != segments[2] {
            return Err(CodecError::Malformed);
        }

        let payload = URL_SAFE_NO_PAD
            .decode(segments[1])
            .map_err(|_| CodecError::Malformed)?;

        serde_json::from_slice(&payload).map_err(|_| CodecError::Malformed)
    }

    fn sign(&self, input: &[u8]) -> String {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC accepts any key length");
        mac.update(input);
        URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
    }
}
