//! Access token verification
//!
//! An access token is a JWE whose plaintext is an EdDSA-signed JWT. The codec
//! holds the two static keys: a P-256 private key for the outer layer and an
//! Ed25519 public key for the inner signature.
//!
//! Every verification failure resolves to "no claims". Only failures of the
//! outer decryption step are surfaced as [`TokenError`] so callers can tell a
//! broken envelope apart from a rejected one, but both mean unauthenticated.

use chrono::Utc;
use jsonwebtoken::jwk::Jwk;
use jsonwebtoken::{Algorithm, DecodingKey, Header, Validation, decode};
use leptos::logging::warn;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwe::{Decrypted, JweDecrypter};
use crate::core::utils::is_valid_uuid;

/// Expected `typ` of the signed inner token
pub const SIGNATURE_TYP: &str = "JWT";
/// Expected signature algorithm of the inner token
pub const SIGNATURE_ALG: Algorithm = Algorithm::EdDSA;

/// Token errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("Invalid {0} key")]
    InvalidKey(&'static str),

    #[error("Malformed token: {0}")]
    Malformed(&'static str),

    #[error("Token decryption failed: {0}")]
    Decryption(&'static str),
}

/// User section of the claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaims {
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Verified token payload
///
/// Time claims are NumericDate values and may carry fractional seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    pub user: UserClaims,
    /// Not before (Unix timestamp)
    pub nbf: f64,
    /// Issued at (Unix timestamp)
    pub iat: f64,
    /// Expiration time (Unix timestamp)
    pub exp: f64,
}

impl Claims {
    /// Check subject and time-window invariants at `now` (Unix seconds)
    pub fn is_valid_at(&self, now: f64) -> bool {
        is_valid_uuid(&self.sub)
            && self.user.id == self.sub
            && self.nbf <= now
            && self.iat <= now
            && now <= self.exp
    }

    /// Get user ID as UUID
    pub fn user_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }
}

/// Decrypts and verifies access tokens
#[derive(Clone)]
pub struct TokenCodec {
    decrypter: JweDecrypter,
    verification_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Create a codec from already loaded keys
    pub fn new(decrypter: JweDecrypter, verification_key: DecodingKey) -> Self {
        // Time claims are checked by `validate` against a fresh clock reading.
        let mut validation = Validation::new(SIGNATURE_ALG);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;

        Self {
            decrypter,
            verification_key,
            validation,
        }
    }

    /// Load both keys from their JSON Web Key form
    pub fn from_jwks(decryption_jwk: &str, verification_jwk: &str) -> Result<Self, TokenError> {
        let decrypter = JweDecrypter::from_jwk(decryption_jwk)?;

        let jwk: Jwk = serde_json::from_str(verification_jwk)
            .map_err(|_| TokenError::InvalidKey("verification"))?;
        let verification_key =
            DecodingKey::from_jwk(&jwk).map_err(|_| TokenError::InvalidKey("verification"))?;

        Ok(Self::new(decrypter, verification_key))
    }

    /// Decrypt and verify a token.
    ///
    /// Returns `Ok(None)` for empty input and for any header, signature or
    /// payload violation. Decryption failures are returned as errors.
    pub fn parse(&self, token: &str) -> Result<Option<Claims>, TokenError> {
        let token = token.trim();
        if token.is_empty() {
            warn!("Empty access token.");
            return Ok(None);
        }

        let Decrypted { header, plaintext } = self.decrypter.decrypt(token)?;
        if !header.is_expected() {
            return Ok(None);
        }

        let Ok(signed) = String::from_utf8(plaintext) else {
            return Ok(None);
        };

        let Ok(data) = decode::<serde_json::Value>(&signed, &self.verification_key, &self.validation)
        else {
            return Ok(None);
        };

        if !is_expected_signature_header(&data.header) {
            return Ok(None);
        }

        Ok(serde_json::from_value::<Claims>(data.claims).ok())
    }

    /// Claims of a fully valid token, checked against the clock as read after
    /// decryption and signature verification
    pub fn verify(&self, token: &str) -> Option<Claims> {
        let claims = self.parse(token).ok().flatten()?;
        let now = Utc::now().timestamp_millis() as f64 / 1000.0;
        claims.is_valid_at(now).then_some(claims)
    }

    /// Check whether a token is currently valid
    pub fn validate(&self, token: &str) -> bool {
        self.verify(token).is_some()
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &SIGNATURE_ALG)
            .finish_non_exhaustive()
    }
}

fn is_expected_signature_header(header: &Header) -> bool {
    header.typ.as_deref() == Some(SIGNATURE_TYP) && header.alg == SIGNATURE_ALG
}
